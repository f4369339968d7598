//! Map image, place markers and the time selected for the map view.

use alibi_domain::{MapMarker, PlaceId, Position, TimePoint};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarkerStore {
    /// Reference to the uploaded image (file name or data URL). Not interpreted.
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    markers: Vec<MapMarker>,
    #[serde(default)]
    selected_time: Option<TimePoint>,
}

impl MapMarkerStore {
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
        tracing::debug!(has_image = self.image.is_some(), "Set map image");
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    pub fn marker(&self, place_id: PlaceId) -> Option<&MapMarker> {
        self.markers.iter().find(|m| m.place_id == place_id)
    }

    /// Puts the marker for `place_id` at `position`, adding it if needed.
    pub fn place(&mut self, place_id: PlaceId, position: Position) {
        match self.markers.iter_mut().find(|m| m.place_id == place_id) {
            Some(marker) => marker.position = position,
            None => self.markers.push(MapMarker::new(place_id, position)),
        }
        tracing::debug!(place_id = %place_id, x = position.x(), y = position.y(), "Placed map marker");
    }

    pub fn move_marker(&mut self, place_id: PlaceId, position: Position) -> Result<(), EngineError> {
        let marker = self
            .markers
            .iter_mut()
            .find(|m| m.place_id == place_id)
            .ok_or_else(|| EngineError::not_found("Map marker", place_id))?;
        marker.position = position;
        tracing::debug!(place_id = %place_id, "Moved map marker");
        Ok(())
    }

    /// Returns whether a marker was removed.
    pub fn remove(&mut self, place_id: PlaceId) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| m.place_id != place_id);
        let removed = self.markers.len() != before;
        if removed {
            tracing::debug!(place_id = %place_id, "Removed map marker");
        }
        removed
    }

    pub fn selected_time(&self) -> Option<TimePoint> {
        self.selected_time
    }

    pub fn select_time(&mut self, time: Option<TimePoint>) {
        self.selected_time = time;
    }
}
