//! # Snapshot / Restore Example
//!
//! Captures a speaker's state, prints the restore plan, waits while you
//! change something on the speaker (skip a track, turn the volume up), then
//! puts everything back.
//!
//! ```bash
//! SONOS_LOG_MODE=development cargo run --example snapshot_restore -- 192.168.1.20 15
//! ```
//!
//! The second argument is how many seconds to wait before restoring (default 10).

use std::time::Duration;

use sonos_snapshot::logging::init_logging_from_env;
use sonos_snapshot::{PlaybackSource, Snapshot, SonosDevice};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging_from_env()?;

    let mut args = std::env::args().skip(1);
    let host = args
        .next()
        .ok_or("usage: snapshot_restore <speaker-ip> [seconds]")?;
    let wait: u64 = match args.next() {
        Some(seconds) => seconds.parse()?,
        None => 10,
    };

    let speaker = SonosDevice::new(host.as_str());

    println!("1. Capturing {}...", host);
    let snapshot = Snapshot::capture(&speaker)?;
    println!("✓ Captured");
    println!("   source:      {:?}", snapshot.source().kind());
    println!("   media url:   {}", snapshot.media_url());
    println!("   coordinator: {}", snapshot.is_coordinator());
    println!(
        "   volume {} / mute {} / bass {} / treble {} / loudness {}",
        snapshot.volume(),
        snapshot.is_muted(),
        snapshot.bass(),
        snapshot.treble(),
        snapshot.is_loudness_enabled()
    );
    if let PlaybackSource::DirectStream { metadata } = snapshot.source() {
        if let Some(title) = &metadata.title {
            println!("   title:       {}", title);
        }
    }

    println!("\n2. Restore plan:");
    for (step, action) in snapshot.restore_plan().actions().iter().enumerate() {
        println!("   {:>2}. {:?}", step + 1, action);
    }

    println!("\n3. Change something on the speaker, restoring in {}s...", wait);
    std::thread::sleep(Duration::from_secs(wait));

    println!("4. Restoring...");
    match snapshot.restore(&speaker) {
        Ok(()) => println!("✓ Restored"),
        Err(e) => {
            println!("✗ Restore failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
