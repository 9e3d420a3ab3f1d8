#![allow(dead_code)]

use chrono::NaiveTime;
use chrono_tz::Tz;

use mesa_rust::db::repositories::LocalRepository;
use mesa_rust::models::Table;

pub fn hhmm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn table(id: &str, sector_id: &str, min_size: u32, max_size: u32) -> Table {
    Table {
        id: id.to_string(),
        sector_id: sector_id.to_string(),
        name: format!("Table {}", id),
        min_size,
        max_size,
    }
}

/// One restaurant (`R1`, UTC), one sector (`S1`), open 10:00-11:00, a single
/// 2-4 seat table `T1`.
pub fn seed_basic() -> LocalRepository {
    let repo = LocalRepository::new();
    repo.add_restaurant("R1", None);
    repo.add_sector("S1", "R1");
    repo.add_service_window("R1", hhmm(10, 0), hhmm(11, 0));
    repo.add_table(table("T1", "S1", 2, 4));
    repo
}

/// Like [`seed_basic`] but open 10:00-12:00 with two 2-4 seat tables, so a
/// party of 8 needs the pair.
pub fn seed_pair() -> LocalRepository {
    let repo = LocalRepository::new();
    repo.add_restaurant("R1", None);
    repo.add_sector("S1", "R1");
    repo.add_service_window("R1", hhmm(10, 0), hhmm(12, 0));
    repo.add_table(table("T1", "S1", 2, 4));
    repo.add_table(table("T2", "S1", 2, 4));
    repo
}

pub fn tz(name: &str) -> Tz {
    name.parse().unwrap()
}
