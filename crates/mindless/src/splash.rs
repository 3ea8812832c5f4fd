//! The splash screen: mounts every effect and stacks their layers.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use mindless_config::{Config, LayersConfig};
use mindless_core::{Presence, Transition, Viewport};
use mindless_effects::{
    BlendMode, CellCanvas, FrameScheduler, GrainRenderer, PixelBuffer, PixelRect, RainRenderer,
    SharedCaption, SplashLayout, StaticRenderer, Subscription, Typewriter, TypewriterTiming,
    draw_scanlines,
};

use crate::logo;

/// Opacity of the logo image.
const LOGO_OPACITY: f32 = 0.9;
/// Opacity of the grain on top of the logo.
const GRAIN_OPACITY: f32 = 0.3;
/// Opacity of the full-screen static.
const STATIC_OPACITY: f32 = 0.08;

/// A mounted splash screen.
///
/// Layers, bottom to top: rain with the torn text, the logo with grain,
/// scanlines, static. Dropping the splash drops its subscriptions, which
/// stops every renderer.
pub struct Splash {
    loading: bool,
    transition: Transition,
    layers: LayersConfig,
    logo: PixelBuffer,
    caption: SharedCaption,
    typewriter: Rc<RefCell<Typewriter>>,
    rain: Rc<RefCell<RainRenderer>>,
    grain: Option<Rc<RefCell<GrainRenderer>>>,
    static_noise: Option<Rc<RefCell<StaticRenderer>>>,
    subscriptions: Vec<Subscription>,
}

impl std::fmt::Debug for Splash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Splash")
            .field("loading", &self.loading)
            .field("transition", &self.transition)
            .field("layers", &self.layers)
            .field("subscriptions", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}

impl Splash {
    /// Create every renderer for `viewport` and register it with `scheduler`.
    pub fn mount(
        scheduler: &FrameScheduler,
        viewport: Viewport,
        config: &Config,
        logo: PixelBuffer,
        now: Duration,
    ) -> Self {
        let device = config.device.resolve(viewport);
        let metrics = config.cell_metrics();
        let layers = config.layers;
        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            ?device,
            "splash mounted"
        );

        let caption = SharedCaption::new();
        let timing = TypewriterTiming {
            type_interval: config.typewriter.type_interval(),
            delete_interval: config.typewriter.delete_interval(),
            pause_after_type: config.typewriter.pause_after_type(),
            pause_after_delete: config.typewriter.pause_after_delete(),
        };
        let mut typewriter = Typewriter::new(&config.caption, timing, caption.clone());
        typewriter.start(now);
        let typewriter = Rc::new(RefCell::new(typewriter));

        let rain = Rc::new(RefCell::new(RainRenderer::new(
            viewport,
            metrics,
            device,
            (config.wordmark.as_str(), config.wordmark_accent.as_str()),
            caption.clone(),
        )));

        let grain = layers.grain.then(|| {
            let mut grain = GrainRenderer::new(device);
            grain.render();
            Rc::new(RefCell::new(grain))
        });
        let static_noise = layers.static_noise.then(|| {
            let mut renderer = StaticRenderer::new(viewport, device);
            renderer.render();
            Rc::new(RefCell::new(renderer))
        });

        let mut subscriptions = Vec::new();
        let tw = typewriter.clone();
        subscriptions.push(scheduler.request_frames(move |now| {
            tw.borrow_mut().advance(now);
        }));
        let frame_rain = rain.clone();
        subscriptions.push(scheduler.request_frames(move |now| {
            frame_rain.borrow_mut().on_frame(now);
        }));
        let resize_rain = rain.clone();
        subscriptions.push(scheduler.on_resize(move |viewport| {
            resize_rain.borrow_mut().resize(viewport);
        }));
        if let Some(grain) = &grain {
            let grain = grain.clone();
            subscriptions.push(scheduler.request_frames(move |now| {
                grain.borrow_mut().on_frame(now);
            }));
        }
        if let Some(renderer) = &static_noise {
            let frame_static = renderer.clone();
            subscriptions.push(scheduler.request_frames(move |now| {
                frame_static.borrow_mut().on_frame(now);
            }));
            let resize_static = renderer.clone();
            subscriptions.push(scheduler.on_resize(move |viewport| {
                resize_static.borrow_mut().resize(viewport);
            }));
        }

        Self {
            loading: true,
            transition: Transition::new(now),
            layers,
            logo,
            caption,
            typewriter,
            rain,
            grain,
            static_noise,
            subscriptions,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Update the loading flag. Clearing it stops the typewriter and starts
    /// the exit transition; the exit cannot be undone.
    pub fn set_loading(&mut self, loading: bool, now: Duration) {
        if loading || !self.loading {
            return;
        }
        self.loading = false;
        self.typewriter.borrow_mut().stop();
        self.transition.begin_exit(now);
        tracing::info!("splash exit started");
    }

    pub fn presence(&self, now: Duration) -> Presence {
        self.transition.presence(now)
    }

    /// Opacity of the whole splash at `now`.
    pub fn opacity(&self, now: Duration) -> f32 {
        self.transition.opacity(now)
    }

    /// Vertical offset of the whole splash at `now`, in pixels.
    pub fn offset_y(&self, now: Duration) -> f32 {
        self.transition.offset_y(now)
    }

    /// Caption currently shown by the typewriter.
    pub fn caption(&self) -> String {
        self.caption.get()
    }

    /// Stack every enabled layer into one canvas.
    pub fn compose(&self) -> CellCanvas {
        let mut canvas = self.rain.borrow().canvas().clone();
        let viewport = canvas.viewport();
        let layout = SplashLayout::new(viewport);

        let logo_rect = layout.logo_rect(logo::aspect(&self.logo));
        canvas.draw_pixels(&self.logo, logo_rect, LOGO_OPACITY, BlendMode::Normal);
        if let Some(grain) = &self.grain {
            let grain = grain.borrow();
            canvas.draw_pixels(grain.buffer(), logo_rect, GRAIN_OPACITY, BlendMode::Overlay);
        }

        if self.layers.scanlines {
            draw_scanlines(&mut canvas);
        }

        if let Some(renderer) = &self.static_noise {
            let full = PixelRect::new(0.0, 0.0, viewport.width as f32, viewport.height as f32);
            let renderer = renderer.borrow();
            canvas.draw_pixels(renderer.buffer(), full, STATIC_OPACITY, BlendMode::Normal);
        }
        canvas
    }
}

impl Drop for Splash {
    fn drop(&mut self) {
        self.subscriptions.clear();
        tracing::info!("splash unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindless_effects::HALF_BLOCK;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn run(scheduler: &FrameScheduler, from: u64, to: u64) {
        for t in (from..=to).step_by(16) {
            scheduler.dispatch_frame(ms(t));
        }
    }

    fn mount(scheduler: &FrameScheduler, config: &Config) -> Splash {
        Splash::mount(
            scheduler,
            Viewport::new(1024, 768),
            config,
            logo::emblem(),
            Duration::ZERO,
        )
    }

    #[test]
    fn mount_registers_every_layer() {
        let scheduler = FrameScheduler::new();
        let splash = mount(&scheduler, &Config::default());
        assert_eq!(scheduler.frame_callbacks(), 4);
        assert_eq!(scheduler.resize_listeners(), 2);
        assert!(splash.is_loading());
        assert_eq!(splash.caption(), "");

        drop(splash);
        assert_eq!(scheduler.frame_callbacks(), 0);
        assert_eq!(scheduler.resize_listeners(), 0);
    }

    #[test]
    fn disabled_layers_are_not_mounted() {
        let scheduler = FrameScheduler::new();
        let mut config = Config::default();
        config.layers.grain = false;
        config.layers.static_noise = false;
        let _splash = mount(&scheduler, &config);
        assert_eq!(scheduler.frame_callbacks(), 2);
        assert_eq!(scheduler.resize_listeners(), 1);
    }

    #[test]
    fn caption_types_while_loading() {
        let scheduler = FrameScheduler::new();
        let splash = mount(&scheduler, &Config::default());
        run(&scheduler, 0, 1200);
        assert_eq!(splash.caption(), "COMING SOON");
        assert_eq!(splash.presence(ms(1200)), Presence::Visible);
    }

    #[test]
    fn exit_freezes_caption_and_finishes() {
        let scheduler = FrameScheduler::new();
        let mut splash = mount(&scheduler, &Config::default());
        run(&scheduler, 0, 500);
        splash.set_loading(false, ms(500));
        let frozen = splash.caption();
        assert!(!frozen.is_empty());

        run(&scheduler, 516, 1200);
        assert_eq!(splash.caption(), frozen);
        assert_eq!(splash.presence(ms(900)), Presence::Exiting);
        assert!(splash.offset_y(ms(900)) < 0.0);
        assert_eq!(splash.presence(ms(1300)), Presence::Gone);
        assert_eq!(splash.opacity(ms(1300)), 0.0);
        assert_eq!(splash.offset_y(ms(1300)), -100.0);

        // loading cannot come back once the exit started
        splash.set_loading(true, ms(1300));
        assert!(!splash.is_loading());
    }

    #[test]
    fn composition_covers_the_viewport() {
        let scheduler = FrameScheduler::new();
        let splash = mount(&scheduler, &Config::default());
        run(&scheduler, 0, 300);
        let canvas = splash.compose();
        assert_eq!(canvas.viewport(), Viewport::new(1024, 768));
        // static and scanlines turn every empty cell into a half block
        assert!(canvas.cells().iter().any(|c| c.symbol == HALF_BLOCK));
        assert!(canvas.cells().iter().any(|c| !c.is_blank() && c.symbol != HALF_BLOCK));
    }

    #[test]
    fn logo_is_drawn_with_half_blocks() {
        let scheduler = FrameScheduler::new();
        let mut config = Config::default();
        config.layers.grain = false;
        config.layers.static_noise = false;
        config.layers.scanlines = false;
        let splash = mount(&scheduler, &config);
        run(&scheduler, 0, 300);

        let canvas = splash.compose();
        let layout = SplashLayout::new(canvas.viewport());
        let rect = layout.logo_rect(1.0);
        let (col, row) = (
            canvas.metrics().col_at(rect.x + rect.width / 2.0),
            canvas.metrics().row_at(rect.y + rect.height / 2.0),
        );
        assert_eq!(canvas.cell(col, row).map(|c| c.symbol), Some(HALF_BLOCK));
    }
}
