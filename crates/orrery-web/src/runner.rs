use orrery_engine::{
    build_draw_list, events_as_floats, DrawList, EngineContext, FrameClock, Game, GameConfig,
    GameEvent, InputEvent, InputQueue, Overlay, Viewport,
};

/// Resolve the config a game runs with: the game's defaults, a per-mount
/// seed, then any host-supplied JSON patch on top.
///
/// A patch that fails to parse, or that yields a config the loop cannot
/// run with, is logged and ignored.
pub fn resolve_config(mut base: GameConfig, seed: u64, options_json: Option<&str>) -> GameConfig {
    base.seed = seed;
    let Some(json) = options_json.map(str::trim).filter(|s| !s.is_empty()) else {
        return base;
    };
    let merged = match base.merge_json(json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring mount options: {}", err);
            return base;
        }
    };
    match merged.validated() {
        Ok(config) => config,
        Err(reason) => {
            log::warn!("ignoring mount options: {}", reason);
            base
        }
    }
}

/// Generic game runner that wires up the engine loop.
///
/// The browser side owns one behind an `Rc<RefCell<_>>`, pushes DOM input
/// into it between frames and calls `tick` once per animation frame.
/// Everything here is plain Rust so the loop can be driven in native tests.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    clock: FrameClock,
    draw_list: DrawList,
    initialized: bool,
    mounted: bool,
    frames: u64,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G, config: GameConfig, viewport: Viewport) -> Self {
        let ctx = EngineContext::new(&config, viewport);
        Self {
            game,
            ctx,
            input: InputQueue::new(),
            clock: FrameClock::new(config.max_frame_dt),
            draw_list: DrawList::new(),
            initialized: false,
            mounted: true,
            frames: 0,
        }
    }

    /// Build the game's scene. Call once after construction.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.game.init(&mut self.ctx);
        self.initialized = true;
        build_draw_list(
            &self.ctx.scene,
            &self.ctx.camera,
            &self.ctx.lights,
            self.ctx.viewport,
            &mut self.draw_list,
        );
    }

    /// Push an input event into the queue. Dropped once unmounted.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.mounted {
            self.input.push(event);
        }
    }

    /// Run one frame at `timestamp_ms` (the animation-frame clock).
    /// Returns false when nothing ran because the runner is not live.
    pub fn tick(&mut self, timestamp_ms: f64) -> bool {
        if !self.initialized || !self.mounted {
            return false;
        }

        let dt = self.clock.tick(timestamp_ms);

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        for event in self.input.iter() {
            if let InputEvent::Resize { width, height } = *event {
                self.ctx.resize(Viewport::new(width, height));
            }
            self.ctx.controls.handle(event, self.ctx.viewport);
        }

        self.game.update(&mut self.ctx, &self.input, dt);

        // Drain input after update
        self.input.drain();

        let EngineContext { controls, camera, .. } = &mut self.ctx;
        controls.update(camera);

        build_draw_list(
            &self.ctx.scene,
            &self.ctx.camera,
            &self.ctx.lights,
            self.ctx.viewport,
            &mut self.draw_list,
        );
        self.frames += 1;
        true
    }

    /// Stop the loop for good: later ticks and input are ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.input.drain();
        self.draw_list.clear();
        self.ctx.clear_frame_data();
        log::info!("runner unmounted after {} frames", self.frames);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn viewport(&self) -> Viewport {
        self.ctx.viewport
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn overlay(&self) -> Overlay {
        self.game.overlay()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.ctx.events
    }

    // ---- Pointer accessors for host-page reads ----

    pub fn game_events_ptr(&self) -> *const f32 {
        events_as_floats(&self.ctx.events).as_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }
}
