#![no_main]

//! Fuzz target for the persisted session.
//!
//! Arbitrary login, logout and raw storage writes are interleaved; after
//! every step the store must hold either both session keys or neither,
//! and hydration must never fail on malformed user records.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use tempfile::tempdir;

use ticketdesk::config::{TOKEN_KEY, USER_KEY};
use ticketdesk::models::{LoginResponse, Role, User};
use ticketdesk::session::SessionStore;
use ticketdesk::storage::LocalStore;

#[derive(Arbitrary, Debug)]
enum Op {
    Login { token: String, name: String, role: u8 },
    Logout,
    Hydrate,
    RawUser(String),
}

fuzz_target!(|ops: Vec<Op>| {
    let dir = match tempdir() {
        Ok(d) => d,
        Err(_) => return,
    };
    let storage = match LocalStore::open(&dir.path().join("storage.db")) {
        Ok(s) => Arc::new(s),
        Err(_) => return,
    };
    let session = match SessionStore::open(Arc::clone(&storage)) {
        Ok(s) => s,
        Err(_) => return,
    };

    for op in ops.into_iter().take(32) {
        match op {
            Op::Login { token, name, role } => {
                let role = [Role::Client, Role::Operator, Role::Admin][role as usize % 3];
                let response = LoginResponse {
                    token,
                    user: User {
                        id: 1,
                        name,
                        email: "fuzz@example.com".to_string(),
                        role,
                    },
                };
                let _ = session.login(response);
            }
            Op::Logout => {
                let _ = session.logout();
            }
            Op::Hydrate => {
                session.hydrate().expect("hydrate never fails on bad data");
            }
            Op::RawUser(raw) => {
                // only a corrupt record, never a half session
                if storage.get(TOKEN_KEY).ok().flatten().is_some() {
                    let _ = storage.set(USER_KEY, &raw);
                }
            }
        }

        let token = storage.get(TOKEN_KEY).ok().flatten();
        let user = storage.get(USER_KEY).ok().flatten();
        assert_eq!(token.is_some(), user.is_some());
    }
});
