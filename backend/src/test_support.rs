//! Shared test doubles and builders for unit tests across the crate.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{UserId, WineDraft, WineId, WineType};

/// Build a UTC timestamp, panicking on impossible calendar input.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture timestamp {year}-{month}-{day}"))
}

/// Clock whose reading can be moved forward between assertions.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Draft for a red wine entered into the cellar on 2020-01-01.
pub fn red_wine_draft(vintage: i32, quantity: u32) -> WineDraft {
    WineDraft {
        id: WineId::new("wine-1").unwrap_or_else(|err| panic!("fixture wine id: {err}")),
        user_id: UserId::new("user-1").unwrap_or_else(|err| panic!("fixture user id: {err}")),
        name: "Viña Ardanza".to_owned(),
        vintage,
        coupage: "80% Tempranillo, 20% Garnacha".to_owned(),
        wine_type: WineType::Red,
        cellar_entry_date: utc(2020, 1, 1, 0, 0),
        quantity,
        alcohol_content: 14.0,
        denomination: "DOCa Rioja".to_owned(),
        winery: "La Rioja Alta".to_owned(),
        suggested_consumption_date: None,
        notes: None,
    }
}

