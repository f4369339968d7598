//! Place markers on the scenario map image.
//!
//! A marker holds its place by id only. Deleting the place leaves the marker
//! in place; it just resolves to no place until it is removed.

use serde::{Deserialize, Serialize};

use crate::entities::Place;
use crate::error::DomainError;
use crate::ids::PlaceId;

/// Pixel position on the map image. May lie outside the image, but both
/// coordinates are finite: JSON has no encoding for infinity or NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Result<Self, DomainError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(DomainError::validation(format!(
                "Map position must be finite, got ({}, {})",
                x, y
            )));
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub place_id: PlaceId,
    pub position: Position,
}

impl MapMarker {
    pub fn new(place_id: PlaceId, position: Position) -> Self {
        Self { place_id, position }
    }
}

/// A marker joined with the place it points at, if that place still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMarker<'a> {
    pub place_id: PlaceId,
    pub place: Option<&'a Place>,
    pub position: Position,
}

impl ResolvedMarker<'_> {
    pub fn is_dangling(&self) -> bool {
        self.place.is_none()
    }
}

pub fn resolve_markers<'a>(markers: &[MapMarker], places: &'a [Place]) -> Vec<ResolvedMarker<'a>> {
    markers
        .iter()
        .map(|marker| ResolvedMarker {
            place_id: marker.place_id,
            place: places.iter().find(|p| p.id == marker.place_id),
            position: marker.position,
        })
        .collect()
}

/// Places that have no marker yet, in their display order.
pub fn unplaced_places<'a>(markers: &[MapMarker], places: &'a [Place]) -> Vec<&'a Place> {
    places
        .iter()
        .filter(|place| !markers.iter().any(|m| m.place_id == place.id))
        .collect()
}
