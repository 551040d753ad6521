//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `itemkit_core` linkage with one item inside one array.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Logging is enabled when `ITEMKIT_LOG_DIR` is set; `ITEMKIT_LOG_LEVEL`
//! overrides the build-mode default level.

use itemkit_core::{default_log_level, init_logging, Item, ItemArray};
use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("ITEMKIT_LOG_DIR") {
        let level = std::env::var("ITEMKIT_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().as_str().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("itemkit: {err}");
            return ExitCode::FAILURE;
        }
    }

    println!("itemkit_core version={}", itemkit_core::core_version());

    let bookmarks = ItemArray::new();
    let item = Item::new().into_shared();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    item.borrow_mut()
        .connect_notify(move |_, property| sink.borrow_mut().push(property.as_str()));

    bookmarks.add_item(&item);
    {
        let mut item = item.borrow_mut();
        item.set_name(Some("Example"));
        item.set_uri(Some("http://example.com"));
        item.set_visits(5);
    }
    log::info!(
        "event=smoke_run module=cli status=ok members={}",
        bookmarks.len()
    );

    println!("itemkit_core members={}", bookmarks.len());
    println!("itemkit_core notified={}", seen.borrow().join(","));
    ExitCode::SUCCESS
}
