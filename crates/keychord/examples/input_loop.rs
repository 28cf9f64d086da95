//! Simulated input loop driving a bind registry.
//!
//! Run with `RUST_LOG=keychord=trace cargo run --example input_loop` to see
//! every edge the registry detects.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use keychord::{BindRegistry, BindSpec, KeyCode, RegistryConfig, RegistryDebug};
use tracing_subscriber::EnvFilter;

const KEY_CTRL: KeyCode = 17;
const KEY_SHIFT: KeyCode = 16;
const KEY_S: KeyCode = 31;
const KEY_SPACE: KeyCode = 32;

fn main() -> keychord::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let jumps = Arc::new(AtomicUsize::new(0));
    let jump_counter = jumps.clone();

    let mut registry = BindRegistry::from_binds_with_config(
        [
            BindSpec::new("jump", [KEY_SPACE])
                .exact_arity(false)
                .with_callback(move || {
                    jump_counter.fetch_add(1, Ordering::Relaxed);
                }),
            BindSpec::new("save", [KEY_CTRL, KEY_S]).with_callback(|| println!("save!")),
            BindSpec::new("save-as", [KEY_CTRL, KEY_SHIFT, KEY_S])
                .with_callback(|| println!("save as...")),
            BindSpec::new("crouch", [KEY_SHIFT])
                .exact_arity(false)
                .on_release()
                .with_callback(|| println!("stand up")),
        ],
        RegistryConfig::new().tick_guard(false),
    )?;

    // One snapshot of held keys per frame.
    let frames: &[&[KeyCode]] = &[
        &[KEY_SPACE],
        &[KEY_SPACE],
        &[KEY_SPACE],
        &[],
        &[KEY_CTRL],
        &[KEY_CTRL, KEY_S],
        &[KEY_S, KEY_CTRL],
        &[KEY_CTRL],
        &[],
        &[KEY_SHIFT],
        &[KEY_SHIFT, KEY_CTRL, KEY_S],
        &[KEY_SHIFT, KEY_CTRL, KEY_S],
        &[],
        &[],
        &[KEY_SPACE, KEY_SHIFT],
        &[KEY_SPACE, KEY_SHIFT],
    ];

    for (frame, pressed) in frames.iter().enumerate() {
        registry.update(pressed);
        if registry.clicked("jump")? {
            println!("frame {frame}: jump");
        }
        if registry.released("crouch")? {
            println!("frame {frame}: crouch armed");
        }
    }

    println!("jumps: {}", jumps.load(Ordering::Relaxed));
    println!("{}", RegistryDebug::new().format(&registry));

    registry.edit("jump", Vec::new())?;
    println!("{}", RegistryDebug::new().format(&registry));
    Ok(())
}
