//! Shared test data: a small dinner-party murder with a populated session.

use alibi_domain::{
    Character, CharacterId, CharacterName, Color, EventDraft, EventId, Place, PlaceId, PlaceName,
    PlayerName, ReferencePolicy, Schedule, TimePoint, TimelineConfig,
};

use crate::session::Session;

/// `HH:mm` on the first scenario day.
pub fn at(hm: &str) -> TimePoint {
    TimePoint::at(0, hm.parse().unwrap())
}

pub struct Sample {
    pub session: Session,
    pub host: CharacterId,
    pub butler: CharacterId,
    pub doctor: CharacterId,
    pub study: PlaceId,
    pub dining_room: PlaceId,
    pub dinner: EventId,
    pub murder: EventId,
}

/// Three characters, two places and three events on a 20:00-23:00 grid
/// at 30 minute steps. Every reference resolves.
pub fn sample_session() -> Sample {
    let host = Character::new(CharacterName::new("Lady Ashworth").unwrap())
        .played_by(PlayerName::new("Mia").unwrap())
        .with_color(Color::from_palette(2))
        .with_sort(1);
    let butler = Character::new(CharacterName::new("Graves").unwrap())
        .with_color(Color::from_palette(6))
        .with_sort(2);
    let doctor = Character::new(CharacterName::new("Dr. Finch").unwrap())
        .with_color(Color::from_palette(9))
        .with_sort(3);
    let study = Place::new(PlaceName::new("Study").unwrap()).with_sort(1);
    let dining_room = Place::new(PlaceName::new("Dining room").unwrap()).with_sort(2);

    let schedule = Schedule::single_day(
        "00:30".parse().unwrap(),
        "20:00".parse().unwrap(),
        "23:00".parse().unwrap(),
    );
    let config = TimelineConfig::new(schedule)
        .with_characters(vec![host.clone(), butler.clone(), doctor.clone()])
        .with_places(vec![study.clone(), dining_room.clone()]);

    let mut session = Session::new(ReferencePolicy::Tolerate);
    session.config_store().commit(config).unwrap();
    session.config_store().rename_scenario("Death at Ashworth Manor").unwrap();

    let dinner = session
        .create_event(
            EventDraft::new(at("20:00"))
                .ending_at(at("21:00"))
                .with_detail("Dinner is served")
                .at_place(dining_room.id)
                .involving(host.id)
                .involving(butler.id)
                .involving(doctor.id)
                .witnessed_by(CharacterId::NPC),
        )
        .unwrap()
        .id;
    let murder = session
        .create_event(
            EventDraft::new(at("21:00"))
                .ending_at(at("21:30"))
                .with_color(Color::from_palette(2))
                .with_detail("Argument behind closed doors")
                .at_place(study.id)
                .involving(host.id)
                .witnessed_by(butler.id),
        )
        .unwrap()
        .id;
    session
        .create_event(
            EventDraft::new(at("21:00"))
                .ending_at(at("22:00"))
                .with_detail("Reads by the fire")
                .at_place(dining_room.id)
                .involving(doctor.id),
        )
        .unwrap();

    Sample {
        session,
        host: host.id,
        butler: butler.id,
        doctor: doctor.id,
        study: study.id,
        dining_room: dining_room.id,
        dinner,
        murder,
    }
}
