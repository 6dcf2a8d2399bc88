use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use game_audio::{
    logging, AppResult, AudioClip, AudioConfig, AudioManager, ChannelId, FrameClock,
};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> AppResult<()> {
    let app_dir = AudioConfig::app_dir().ok();
    logging::initialize_tracing(app_dir.as_deref());

    let config = match AudioConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config ({}), using defaults", e);
            AudioConfig::default()
        }
    };

    // Usage: game-audio-demo [menu-music] [battle-music] [sfx]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let menu = load_clip(args.first(), "menu")?;
    let battle = load_clip(args.get(1), "battle")?;
    let hit = load_clip(args.get(2), "hit")?;

    run_demo(config, menu, battle, hit)
}

fn load_clip(path: Option<&String>, placeholder: &str) -> AppResult<AudioClip> {
    match path {
        Some(path) => AudioClip::from_file(Path::new(path))
            .with_context(|| format!("Failed to load {} clip", placeholder)),
        None => Ok(AudioClip::silent(placeholder)),
    }
}

#[cfg(feature = "rodio_backend")]
fn run_demo(
    config: AudioConfig,
    menu: AudioClip,
    battle: AudioClip,
    hit: AudioClip,
) -> AppResult<()> {
    use game_audio::audio_system::RodioOutput;

    let output = RodioOutput::try_default().context("Failed to open audio output")?;
    let manager = AudioManager::with_rodio(config, &output);
    script(manager, menu, battle, hit);
    Ok(())
}

#[cfg(not(feature = "rodio_backend"))]
fn run_demo(
    config: AudioConfig,
    menu: AudioClip,
    battle: AudioClip,
    hit: AudioClip,
) -> AppResult<()> {
    tracing::info!("Built without rodio_backend, running headless");
    script(AudioManager::headless(config), menu, battle, hit);
    Ok(())
}

fn script(mut manager: AudioManager, menu: AudioClip, battle: AudioClip, hit: AudioClip) {
    let mut clock = manager.frame_clock();

    manager.play_music(menu.clone());
    run_for(&mut manager, &mut clock, Duration::from_secs(1));

    manager.play_music_with_fade(battle, 1.5);
    run_for(&mut manager, &mut clock, Duration::from_millis(3500));

    let handle = manager.handle();
    let sfx_thread = thread::spawn(move || {
        for _ in 0..3 {
            handle.play_sfx_with_volume(hit.clone(), 0.8);
            thread::sleep(Duration::from_millis(200));
        }
    });

    manager.play_music_with_cross_fade(menu, 2.0);
    run_for(&mut manager, &mut clock, Duration::from_millis(2500));

    if sfx_thread.join().is_err() {
        tracing::warn!("Effects thread panicked");
    }

    manager.stop_all();
    tracing::info!("Demo finished");
}

/// Tick at roughly 60 fps for `length`, logging deck state every quarter second
fn run_for(manager: &mut AudioManager, clock: &mut FrameClock, length: Duration) {
    let start = Instant::now();
    let mut next_report = Duration::ZERO;

    while start.elapsed() < length {
        manager.update_with_clock(clock);

        if start.elapsed() >= next_report {
            report(manager);
            next_report += Duration::from_millis(250);
        }
        thread::sleep(FRAME);
    }
}

fn report(manager: &AudioManager) {
    let deck = |id: ChannelId| {
        let channel = manager.channel(id);
        format!(
            "{}[{} {:.2}{}]",
            id,
            channel
                .clip()
                .map(|c| c.name().to_string())
                .unwrap_or_else(|| "-".to_string()),
            channel.volume(),
            if channel.is_playing() { " >" } else { "" }
        )
    };

    tracing::info!(
        "{} {} | transitions={} one-shots={}",
        deck(ChannelId::MusicA),
        deck(ChannelId::MusicB),
        manager.transitions().len(),
        manager.channel(ChannelId::Sfx).active_one_shots()
    );
}
