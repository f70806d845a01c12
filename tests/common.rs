#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use rpunchclock::core::admin::AdminLogic;
use rpunchclock::core::auto_checkout::CheckoutPolicy;
use rpunchclock::core::punch::{PunchLogic, PunchReceipt};
use rpunchclock::db::pool::DbPool;
use rpunchclock::models::punch::NewPunch;
use rpunchclock::models::user::NewUser;
use rpunchclock::utils::time::parse_timestamp;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rpc() -> Command {
    cargo_bin_cmd!("rpunchclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpunchclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

pub fn ts(s: &str) -> NaiveDateTime {
    parse_timestamp(s).expect("valid timestamp")
}

/// In-memory store with the usual activity types, one department and two users.
pub struct Seed {
    pub pool: DbPool,
    pub work: i64,
    pub brk: i64,
    pub end: i64,
    pub dept: i64,
    /// auto checkout enabled
    pub alice: i64,
    /// auto checkout disabled
    pub bob: i64,
}

pub fn seed() -> Seed {
    let mut pool = DbPool::in_memory().expect("open store");

    let work = AdminLogic::create_activity(&mut pool, "Work", true, "")
        .unwrap()
        .id;
    let brk = AdminLogic::create_activity(&mut pool, "Break", false, "")
        .unwrap()
        .id;
    let end = AdminLogic::create_activity(&mut pool, "End of work", false, "")
        .unwrap()
        .id;
    let dept = AdminLogic::create_department(&mut pool, "Production")
        .unwrap()
        .id;

    let alice = AdminLogic::create_user(
        &mut pool,
        &NewUser {
            name: "Alice".into(),
            stamp_key: Some("111111111111".into()),
            department_id: Some(dept),
            auto_checkout_midnight: true,
            ..NewUser::default()
        },
    )
    .unwrap()
    .id;

    let bob = AdminLogic::create_user(
        &mut pool,
        &NewUser {
            name: "Bob".into(),
            department_id: Some(dept),
            ..NewUser::default()
        },
    )
    .unwrap()
    .id;

    Seed {
        pool,
        work,
        brk,
        end,
        dept,
        alice,
        bob,
    }
}

pub fn punch(pool: &mut DbPool, user_id: i64, activity_type_id: i64, at: &str) -> PunchReceipt {
    let p = NewPunch {
        user_id,
        activity_type_id,
        timestamp: ts(at),
        comment: None,
    };
    PunchLogic::record(pool, &p, &CheckoutPolicy::default()).expect("punch recorded")
}

/// `init` a file-backed store and register one work and one break activity.
pub fn init_cli_db(db_path: &str) {
    rpc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rpc()
        .args(["--db", db_path, "--test", "activity", "add", "Work", "--work"])
        .assert()
        .success();

    rpc()
        .args(["--db", db_path, "--test", "activity", "add", "Break", "--no-work"])
        .assert()
        .success();
}
