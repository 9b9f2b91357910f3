//! Lumen demo - moves a box with the arrow keys.
//!
//! Enter switches the screen to `World` and F3 toggles the debug overlay.
//! Set `RUST_LOG=debug` for more output.

use env_logger::Env;
use log::info;

use lumen_engine::prelude::*;

/// Box that eases toward a target moved by the arrow keys.
struct Demo {
    target: (f32, f32),
    position: (f32, f32),
}

impl Demo {
    const STEP: f32 = 240.0;
    const EASING: f32 = 0.2;
    const SIZE: f32 = 32.0;

    fn new() -> Self {
        Self {
            target: (100.0, 100.0),
            position: (100.0, 100.0),
        }
    }
}

impl FrameHandler for Demo {
    fn on_start(&mut self, ctx: &mut FrameContext<'_>) {
        info!("Demo started at tick {}", ctx.tick());
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if ctx.keyboard().is_key_pressed(KeyCode::Enter) && ctx.set_screen(ScreenType::World) {
            info!("Entered world screen");
        }

        for event in ctx.events().read(EventType::SurfaceResized) {
            info!("Surface is now {:?}", event);
        }

        let step = Self::STEP * ctx.delta().as_secs_f32();
        let keyboard = ctx.keyboard();
        if keyboard.is_key_down(KeyCode::ArrowLeft) {
            self.target.0 -= step;
        }
        if keyboard.is_key_down(KeyCode::ArrowRight) {
            self.target.0 += step;
        }
        if keyboard.is_key_down(KeyCode::ArrowUp) {
            self.target.1 -= step;
        }
        if keyboard.is_key_down(KeyCode::ArrowDown) {
            self.target.1 += step;
        }

        self.position = (
            self.position.0.lerp(&self.target.0, Self::EASING),
            self.position.1.lerp(&self.target.1, Self::EASING),
        );
    }

    fn render(&mut self, canvas: &mut Canvas) {
        let (width, height) = canvas.size();
        canvas.fill_rect(LayerType::Scene, 0.0, 0.0, width as f32, height as f32, Color::rgb(0.08, 0.08, 0.1));
        canvas.fill_rect(LayerType::Scene, self.position.0, self.position.1, Self::SIZE, Self::SIZE, Color::BLUE);
        canvas.draw_text(LayerType::Ui, 8.0, height as f32 - 24.0, 14.0, "arrows: move  enter: world  F3: debug", Color::WHITE);
    }

    fn on_stop(&mut self, _ctx: &mut FrameContext<'_>) {
        info!("Demo stopped at ({:.0}, {:.0})", self.position.0, self.position.1);
    }
}

fn main() -> Result<(), EngineError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Lumen demo v{}", env!("CARGO_PKG_VERSION"));

    EngineBuilder::new()
        .with_window_title("Lumen Demo")
        .with_window_size(960, 540)
        .build(Demo::new())
        .run()
}
