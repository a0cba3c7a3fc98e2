use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use typed_builder::TypedBuilder;

pub use sdl2;
pub use starguard_common;
pub use starguard_common::app::App;

use starguard_common::key::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    RGB24,
}

#[derive(TypedBuilder)]
pub struct SdlInitInfo {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
    pub title: String,
    #[builder(default = PixelFormat::RGB24)]
    pub pixel_format: PixelFormat,
    /// Target frame time, ~60 FPS by default.
    #[builder(default = Duration::from_micros(16_667))]
    pub frame_time: Duration,
}

pub struct SdlContext;

impl SdlContext {
    /// Open a window and drive `app` until it asks to exit or the window is
    /// closed. Each frame gets the milliseconds elapsed since start.
    pub fn run(sdl_init_info: SdlInitInfo, mut app: impl App) -> Result<()> {
        let SdlInitInfo {
            width,
            height,
            scale,
            title,
            pixel_format,
            frame_time,
        } = sdl_init_info;

        let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
        let window = video_subsystem
            .window(&title, width * scale, height * scale)
            .position_centered()
            .build()?;
        let mut canvas = window.into_canvas().present_vsync().build()?;
        canvas
            .set_scale(scale as f32, scale as f32)
            .map_err(|e| anyhow!(e))?;

        let creator = canvas.texture_creator();
        let mut texture =
            creator.create_texture_streaming(map_pixel_format(pixel_format), width, height)?;

        let color_size = map_pixel_format_size(pixel_format);
        let mut screen_state = vec![0u8; (width * color_size * height) as usize];
        let mut event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;

        app.init();
        log::info!("window '{title}' opened at {width}x{height} (x{scale})");

        let started = Instant::now();
        let mut last_frame = started;

        loop {
            if app.should_exit() {
                app.exit();
                break;
            }

            for event in event_pump.poll_iter() {
                match event {
                    Event::Quit { .. } => {
                        app.exit();
                        return Ok(());
                    }
                    Event::KeyDown {
                        keycode: Some(keycode),
                        repeat: false,
                        ..
                    } => app.handle_key_event(map_keycode(keycode), true),
                    Event::KeyUp {
                        keycode: Some(keycode),
                        ..
                    } => app.handle_key_event(map_keycode(keycode), false),
                    _ => {}
                }
            }

            let timestamp_ms = started.elapsed().as_secs_f64() * 1000.0;
            app.update(timestamp_ms, &mut screen_state);

            texture.update(None, &screen_state, (width * color_size) as usize)?;
            canvas.clear();
            canvas.copy(&texture, None, None).map_err(|e| anyhow!(e))?;
            canvas.present();

            let elapsed = last_frame.elapsed();
            if elapsed < frame_time {
                std::thread::sleep(frame_time - elapsed);
            }
            last_frame = Instant::now();
        }

        Ok(())
    }
}

pub fn map_pixel_format(pixel_format: PixelFormat) -> PixelFormatEnum {
    match pixel_format {
        PixelFormat::RGB24 => PixelFormatEnum::RGB24,
    }
}

pub fn map_pixel_format_size(pixel_format: PixelFormat) -> u32 {
    match pixel_format {
        PixelFormat::RGB24 => 3,
    }
}

pub fn map_keycode(keycode: Keycode) -> Key {
    match keycode {
        Keycode::A => Key::A,
        Keycode::D => Key::D,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Space => Key::Space,
        Keycode::Escape => Key::Escape,
        _ => Key::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_space_map_to_game_keys() {
        assert_eq!(map_keycode(Keycode::Left), Key::Left);
        assert_eq!(map_keycode(Keycode::Right), Key::Right);
        assert_eq!(map_keycode(Keycode::Space), Key::Space);
        assert_eq!(map_keycode(Keycode::Escape), Key::Escape);
        assert_eq!(map_keycode(Keycode::Q), Key::None);
    }

    #[test]
    fn init_info_defaults_to_rgb24_at_60fps() {
        let info = SdlInitInfo::builder()
            .width(720)
            .height(540)
            .scale(1)
            .title("Starguard".to_string())
            .build();
        assert_eq!(info.pixel_format, PixelFormat::RGB24);
        assert_eq!(map_pixel_format_size(info.pixel_format), 3);
        assert_eq!(info.frame_time, Duration::from_micros(16_667));
    }
}
