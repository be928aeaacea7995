//! Mello Arcade entry point
//!
//! In the browser this boots the page named by the `data-game` attribute:
//! one of the games on its canvas, or the combined hall of fame. Natively it runs a headless demo: both arcade games played by
//! the autopilot, then a bot-vs-bot tic-tac-toe match.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Context, Result, anyhow};
    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, EventTarget, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent};

    use std::collections::BTreeMap;

    use mello_arcade::consts::LOCAL_HALL_SIZE;
    use mello_arcade::leaderboard::{LeaderboardEntry, LeaderboardQuery, group_by_game, hall_line};
    use mello_arcade::leaderboard::remote::RemoteLeaderboard;
    use mello_arcade::platform::web::{AnimationFrameScheduler, Timeout};
    use mello_arcade::platform::{FrameClock, LoopControl, LoopDriver};
    use mello_arcade::renderer::canvas::CanvasRenderer;
    use mello_arcade::renderer::{BoardLayout, BoardScene, DrawList, Scene, SceneView};
    use mello_arcade::session::{EndSummary, Identity, SubmitError};
    use mello_arcade::sim::{Arcade, FlyerState, RunnerState};
    use mello_arcade::tictactoe::{BotTicket, TicTacToeMatch};
    use mello_arcade::{GameKind, LocalRecords, Page, Session, SessionPhase, Settings, Tuning};

    type Remote = Option<RemoteLeaderboard>;
    type Driver = Rc<RefCell<LoopDriver<AnimationFrameScheduler>>>;

    /// Widest tic-tac-toe grid
    const BOARD_MAX_WIDTH: f32 = 448.0;
    const BOARD_STATUS_HEIGHT: f32 = 48.0;

    pub fn start() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        if let Err(e) = boot() {
            log::error!("Mello Arcade failed to start: {:#}", e);
        }
    }

    fn boot() -> Result<()> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .context("no document")?;
        let root = document
            .query_selector("[data-game]")
            .map_err(|e| anyhow!("querySelector failed: {:?}", e))?
            .context("no element with a data-game attribute")?;

        let page = root
            .get_attribute("data-game")
            .and_then(|g| match g.parse::<Page>() {
                Ok(page) => Some(page),
                Err(e) => {
                    log::warn!("{}, falling back to {}", e, GameKind::Runner);
                    None
                }
            })
            .unwrap_or(Page::Game(GameKind::Runner));
        let remote = RemoteLeaderboard::from_env();

        let kind = match page {
            Page::Game(kind) => kind,
            Page::HallOfFame => {
                log::info!("Booting the hall of fame");
                run_hall_of_fame(root, remote);
                return Ok(());
            }
        };
        let canvas = root
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| anyhow!("data-game is not set on a canvas"))?;

        let settings = Settings::load();
        let records = LocalRecords::load_with(&settings);
        let tuning = Tuning::default();
        let seed = js_sys::Date::now() as u64;
        log::info!("Booting {} (seed {})", kind, seed);

        match kind {
            GameKind::Runner => {
                let (w, h) = tuning.runner.canvas_size(viewport_width());
                let game = RunnerState::new(tuning.runner.clone(), tuning.effects.clone(), w, h, seed);
                let sizing = tuning.runner.clone();
                run_arcade(canvas, game, records, remote, settings, move |vw| sizing.canvas_size(vw))
            }
            GameKind::Flyer => {
                let (w, h) = tuning.flyer.canvas_size(viewport_width());
                let game = FlyerState::new(tuning.flyer.clone(), tuning.effects.clone(), w, h, seed);
                let sizing = tuning.flyer.clone();
                run_arcade(canvas, game, records, remote, settings, move |vw| sizing.canvas_size(vw))
            }
            GameKind::TicTacToe => run_tictactoe(canvas, remote, settings),
        }
    }

    // === DOM helpers ===

    fn viewport_width() -> f32 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(1024.0) as f32
    }

    fn by_id(id: &str) -> Option<Element> {
        web_sys::window()?.document()?.get_element_by_id(id)
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn input_value(id: &str) -> String {
        by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn clear_inputs() {
        for id in ["name-input", "contact-input"] {
            if let Some(input) = by_id(id).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
                input.set_value("");
            }
        }
        set_text("prompt-error", "");
    }

    fn listen<F>(target: &EventTarget, event: &str, handler: F)
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn listen_by_id<F>(id: &str, event: &str, handler: F)
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        if let Some(el) = by_id(id) {
            listen(&el, event, handler);
        }
    }

    /// Pointer position in canvas pixels (the canvas may be scaled by CSS)
    fn canvas_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
        let scale_x = canvas.width() as f32 / canvas.client_width().max(1) as f32;
        let scale_y = canvas.height() as f32 / canvas.client_height().max(1) as f32;
        Vec2::new(event.offset_x() as f32 * scale_x, event.offset_y() as f32 * scale_y)
    }

    /// Fill the hall of fame list beside the game
    fn show_hall(rows: &[(String, i64)]) {
        let Some(list) = by_id("hall-list") else {
            return;
        };
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        list.set_text_content(None);
        if rows.is_empty() {
            list.set_text_content(Some("Noch keine Einträge."));
            return;
        }
        for (i, (name, score)) in rows.iter().enumerate() {
            if let Ok(item) = document.create_element("li") {
                item.set_text_content(Some(&hall_line(i, name, *score)));
                let _ = list.append_child(&item);
            }
        }
    }

    /// Shared top list if the store answers, the local one otherwise
    fn refresh_hall(kind: GameKind, remote: Remote, records: &LocalRecords) {
        let local: Vec<(String, i64)> = records
            .hall(kind)
            .iter()
            .map(|e| (e.name.clone(), i64::from(e.score)))
            .collect();
        show_hall(&local);

        let Some(remote) = remote else {
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            match remote.fetch_top(LeaderboardQuery::for_game(kind)).await {
                Ok(entries) => {
                    let rows: Vec<(String, i64)> = entries.into_iter().map(|e| (e.name, e.score)).collect();
                    show_hall(&rows);
                }
                Err(e) => log::warn!("Could not load the hall of fame: {:#}", e),
            }
        });
    }

    // === Hall of fame ===

    /// Fill `grid` with one column per game
    fn render_hall_grid(
        grid: &Element,
        groups: &BTreeMap<GameKind, Vec<LeaderboardEntry>>,
    ) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        grid.set_text_content(None);

        for game in GameKind::ALL {
            let column = document.create_element("section")?;
            column.set_attribute("class", "hall-column")?;

            let heading = document.create_element("h2")?;
            let link = document.create_element("a")?;
            link.set_attribute("href", &format!("/minigames/{}", game.as_str().to_lowercase()))?;
            link.set_text_content(Some(game.as_str()));
            heading.append_child(&link)?;
            column.append_child(&heading)?;

            let rows = groups.get(&game).map(Vec::as_slice).unwrap_or_default();
            if rows.is_empty() {
                let empty = document.create_element("p")?;
                empty.set_text_content(Some("Keine Einträge vorhanden."));
                column.append_child(&empty)?;
            } else {
                let list = document.create_element("ol")?;
                for (rank, entry) in rows.iter().enumerate() {
                    let item = document.create_element("li")?;
                    item.set_text_content(Some(&hall_line(rank, &entry.name, entry.score)));
                    list.append_child(&item)?;
                }
                column.append_child(&list)?;
            }
            grid.append_child(&column)?;
        }
        Ok(())
    }

    /// Combined page: the top 50 of the shared table, five per game
    fn run_hall_of_fame(grid: Element, remote: Remote) {
        let Some(remote) = remote else {
            log::warn!("No leaderboard configured, hall of fame stays empty");
            if let Err(e) = render_hall_grid(&grid, &BTreeMap::new()) {
                log::error!("Could not draw the hall of fame: {:?}", e);
            }
            return;
        };

        grid.set_text_content(Some("Lade Daten..."));
        wasm_bindgen_futures::spawn_local(async move {
            let rows = match remote.fetch_top(LeaderboardQuery::all()).await {
                Ok(rows) => rows,
                Err(e) => {
                    log::error!("Could not load the hall of fame: {:#}", e);
                    Vec::new()
                }
            };
            log::info!("Hall of fame loaded ({} rows)", rows.len());
            if let Err(e) = render_hall_grid(&grid, &group_by_game(&rows, LOCAL_HALL_SIZE)) {
                log::error!("Could not draw the hall of fame: {:?}", e);
            }
        });
    }

    // === Arcade games ===

    struct ArcadeApp<G: Arcade> {
        session: Session<G, Remote>,
        clock: FrameClock,
        renderer: CanvasRenderer,
        settings: Settings,
        list: DrawList,
    }

    impl<G: Arcade + Scene> ArcadeApp<G> {
        fn render(&mut self) {
            self.list.clear();
            let view = SceneView {
                settings: &self.settings,
                best: self.session.best(),
            };
            self.session.game().draw(&view, &mut self.list);
            self.renderer.render(&self.list);
        }

        /// One display frame
        fn frame(&mut self, time: f64) -> LoopControl {
            let steps = self.clock.advance(time);
            let ended = self.session.advance(steps);
            self.render();

            if let Some(summary) = ended {
                self.show_end(&summary);
                return LoopControl::Stop;
            }
            if self.session.phase() == SessionPhase::Running {
                LoopControl::Continue
            } else {
                LoopControl::Stop
            }
        }

        fn show_end(&self, summary: &EndSummary) {
            set_text("final-score", &summary.score.to_string());
            if self.session.prompt_open() {
                set_text("prompt-score", &summary.score.to_string());
                clear_inputs();
                set_hidden("prompt", false);
            }
            set_text("start-btn", "Nochmal");
            set_hidden("start-btn", false);
        }

        fn pause(&mut self) -> bool {
            if !self.session.pause() {
                return false;
            }
            set_text("start-btn", "Weiter");
            set_hidden("start-btn", false);
            true
        }

        /// Jump while running; otherwise start, restart or resume. A restart
        /// closes an open prompt unsent.
        fn press(&mut self) -> bool {
            if !self.session.press() {
                return false;
            }
            self.clock.reset();
            set_hidden("prompt", true);
            set_hidden("start-btn", true);
            true
        }
    }

    fn run_arcade<G, F>(
        canvas: HtmlCanvasElement,
        game: G,
        records: LocalRecords,
        remote: Remote,
        settings: Settings,
        sizing: F,
    ) -> Result<()>
    where
        G: Arcade + Scene + 'static,
        F: Fn(f32) -> (f32, f32) + 'static,
    {
        let renderer = CanvasRenderer::new(canvas.clone())?;
        let (w, h) = game.size();
        renderer.resize(w, h);
        refresh_hall(G::KIND, remote.clone(), &records);

        let app = Rc::new(RefCell::new(ArcadeApp {
            session: Session::new(game, remote, records),
            clock: FrameClock::new(),
            renderer,
            settings,
            list: DrawList::new(),
        }));
        let driver: Driver = Rc::new(RefCell::new(LoopDriver::new(AnimationFrameScheduler::default())));

        // Frame callback, installed once and reused by every request
        {
            let app = app.clone();
            let frame_driver = driver.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                frame_driver.borrow_mut().fire(|| app.borrow_mut().frame(time));
            });
            driver.borrow_mut().scheduler_mut().set_callback(callback);
        }

        let press = {
            let app = app.clone();
            let driver = driver.clone();
            move || {
                if app.borrow_mut().press() {
                    driver.borrow_mut().start();
                }
            }
        };

        let window = web_sys::window().context("no window")?;

        // Keyboard: Space / ArrowUp / W
        {
            let press = press.clone();
            listen(&window, "keydown", move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                // Typing a name in the prompt
                if event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    .is_some()
                {
                    return;
                }
                if matches!(key.code().as_str(), "Space" | "ArrowUp" | "KeyW") {
                    event.prevent_default();
                    press();
                }
            });
        }

        // Click / tap on the canvas
        {
            let press = press.clone();
            listen(&canvas, "pointerdown", move |event| {
                event.prevent_default();
                press();
            });
        }

        // Start / restart / resume button
        listen_by_id("start-btn", "click", move |_| press());

        // Resize recomputes the canvas and the runner's ground line
        {
            let app = app.clone();
            listen(&window, "resize", move |_| {
                let (w, h) = sizing(viewport_width());
                let mut a = app.borrow_mut();
                a.session.resize(w, h);
                a.renderer.resize(w, h);
                a.render();
            });
        }

        // Identity prompt
        {
            let app = app.clone();
            listen_by_id("submit-btn", "click", move |event| {
                event.prevent_default();
                let identity = Identity::new(&input_value("name-input"), &input_value("contact-input"));
                let mut a = app.borrow_mut();
                match a.session.submit_identity(identity) {
                    Ok(_) => {
                        set_hidden("prompt", true);
                        clear_inputs();
                        refresh_hall(G::KIND, a.session.leaderboard().clone(), a.session.records());
                    }
                    Err(e) => set_text("prompt-error", &e.to_string()),
                }
            });
        }
        {
            let app = app.clone();
            listen_by_id("skip-btn", "click", move |_| {
                app.borrow_mut().session.dismiss_prompt();
                set_hidden("prompt", true);
            });
        }

        // Auto-pause when the tab is hidden or the window loses focus
        {
            let app = app.clone();
            let driver = driver.clone();
            let document = window.document().context("no document")?;
            let doc = document.clone();
            listen(&document, "visibilitychange", move |_| {
                if doc.visibility_state() == web_sys::VisibilityState::Hidden && app.borrow_mut().pause() {
                    driver.borrow_mut().stop();
                    log::info!("Auto-paused (tab hidden)");
                }
            });
        }
        {
            let app = app.clone();
            let driver = driver.clone();
            listen(&window, "blur", move |_| {
                if app.borrow_mut().pause() {
                    driver.borrow_mut().stop();
                    log::info!("Auto-paused (window blur)");
                }
            });
        }

        app.borrow_mut().render();
        log::info!("{} ready", G::KIND);
        Ok(())
    }

    // === Tic-tac-toe ===

    struct BoardApp {
        game: TicTacToeMatch,
        leaderboard: Remote,
        renderer: CanvasRenderer,
        layout: BoardLayout,
        width: f32,
        settings: Settings,
        list: DrawList,
        /// Pending bot reply; dropping it clears the timeout
        bot_timer: Option<Timeout>,
    }

    impl BoardApp {
        fn fit(&mut self) {
            let width = (viewport_width() - 32.0).clamp(1.0, BOARD_MAX_WIDTH);
            let height = width + BOARD_STATUS_HEIGHT;
            self.renderer.resize(width, height);
            self.layout = BoardLayout::fit(width, height);
            self.width = width;
        }

        fn render(&mut self) {
            self.list.clear();
            let view = SceneView {
                settings: &self.settings,
                best: 0,
            };
            let scene = BoardScene {
                game: &self.game,
                layout: self.layout,
                width: self.width,
            };
            scene.draw(&view, &mut self.list);
            self.renderer.render(&self.list);
            set_hidden("prompt", !self.game.prompt_open());
        }

        fn bot_move(&mut self, ticket: BotTicket) {
            if self.game.apply_bot_move(ticket).is_some() {
                self.render();
            }
        }

        fn reset(&mut self) {
            self.bot_timer = None;
            self.game.reset();
            clear_inputs();
            self.render();
        }
    }

    fn run_tictactoe(canvas: HtmlCanvasElement, remote: Remote, settings: Settings) -> Result<()> {
        let renderer = CanvasRenderer::new(canvas.clone())?;
        let app = Rc::new(RefCell::new(BoardApp {
            game: TicTacToeMatch::new(),
            leaderboard: remote,
            renderer,
            layout: BoardLayout::fit(BOARD_MAX_WIDTH, BOARD_MAX_WIDTH + BOARD_STATUS_HEIGHT),
            width: BOARD_MAX_WIDTH,
            settings,
            list: DrawList::new(),
            bot_timer: None,
        }));
        app.borrow_mut().fit();

        // Human move, then the bot after its delay
        {
            let app = app.clone();
            let canvas_ref = canvas.clone();
            listen(&canvas, "pointerdown", move |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let point = canvas_point(&canvas_ref, mouse);
                let ticket = {
                    let mut a = app.borrow_mut();
                    if a.game.is_locked() {
                        return;
                    }
                    let Some(slot) = a.layout.slot_at(point) else {
                        return;
                    };
                    match a.game.human_move(slot) {
                        Ok(ticket) => {
                            a.render();
                            ticket
                        }
                        Err(e) => {
                            log::debug!("Move refused: {}", e);
                            return;
                        }
                    }
                };
                if let Some(ticket) = ticket {
                    let delay = app.borrow().settings.bot_delay_ms();
                    let bot_app = app.clone();
                    let timer = Timeout::new(delay, move || bot_app.borrow_mut().bot_move(ticket));
                    app.borrow_mut().bot_timer = timer;
                }
            });
        }

        {
            let app = app.clone();
            listen_by_id("restart-btn", "click", move |_| app.borrow_mut().reset());
        }

        {
            let app = app.clone();
            listen_by_id("submit-btn", "click", move |event| {
                event.prevent_default();
                let identity = Identity::new(&input_value("name-input"), &input_value("contact-input"));
                let mut guard = app.borrow_mut();
                let a = &mut *guard;
                match a.game.submit_identity(identity, &mut a.leaderboard) {
                    Ok(_) => {
                        clear_inputs();
                        a.render();
                    }
                    Err(SubmitError::MissingName) => set_text("prompt-error", "Bitte gib deinen Namen ein."),
                    Err(e) => set_text("prompt-error", &e.to_string()),
                }
            });
        }
        {
            let app = app.clone();
            // Closing the prompt starts a new match
            listen_by_id("skip-btn", "click", move |_| app.borrow_mut().reset());
        }

        {
            let app = app.clone();
            let window = web_sys::window().context("no window")?;
            listen(&window, "resize", move |_| {
                let mut a = app.borrow_mut();
                a.fit();
                a.render();
            });
        }

        app.borrow_mut().render();
        log::info!("TicTacToe ready");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_app::start();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use anyhow::{Context, Result};

    use mello_arcade::leaderboard::{LeaderboardQuery, MemoryLeaderboard};
    use mello_arcade::platform::{FrameClock, LoopControl, LoopDriver, ManualScheduler};
    use mello_arcade::session::{EndSummary, Identity};
    use mello_arcade::sim::{Arcade, FlyerState, RunnerState};
    use mello_arcade::tictactoe::{Board, Mark, best_move_for};
    use mello_arcade::{GameKind, LocalRecords, Session, Settings, Tuning};

    /// Seed shared by both demo runs
    const DEMO_SEED: u64 = 20_251_019;
    /// Give up on a run after five minutes of simulated play
    const MAX_DEMO_MS: f64 = 5.0 * 60.0 * 1000.0;
    /// Viewport the demo pretends to have
    const DEMO_VIEWPORT: f32 = 1280.0;

    pub fn run(tuning: Tuning) -> Result<()> {
        let settings = Settings::load();
        let mut records = LocalRecords::load_with(&settings);
        let mut leaderboard = MemoryLeaderboard::new();

        let (w, h) = tuning.runner.canvas_size(DEMO_VIEWPORT);
        let runner = RunnerState::new(tuning.runner.clone(), tuning.effects.clone(), w, h, DEMO_SEED);
        (records, leaderboard) = play(runner, records, leaderboard)?;

        let (w, h) = tuning.flyer.canvas_size(DEMO_VIEWPORT);
        let flyer = FlyerState::new(tuning.flyer.clone(), tuning.effects.clone(), w, h, DEMO_SEED);
        (records, leaderboard) = play(flyer, records, leaderboard)?;

        for kind in [GameKind::Runner, GameKind::Flyer] {
            for (rank, entry) in leaderboard.top(LeaderboardQuery::for_game(kind)).iter().enumerate() {
                println!("{} #{}: {} {}", kind, rank + 1, entry.name, entry.score);
            }
        }
        records.save();

        tictactoe_self_play()
    }

    /// Play one autopilot run, driven frame by frame at 60 Hz
    fn play<G: Arcade>(
        game: G,
        records: LocalRecords,
        leaderboard: MemoryLeaderboard,
    ) -> Result<(LocalRecords, MemoryLeaderboard)> {
        let mut session = Session::new(game, leaderboard, records);
        let mut driver = LoopDriver::new(ManualScheduler::default());
        let mut clock = FrameClock::new();
        let mut ended: Option<EndSummary> = None;
        let mut now = 0.0;

        session.start();
        driver.start();
        while driver.is_running() {
            now += 1000.0 / 60.0;
            driver.fire(|| {
                for _ in 0..clock.advance(now) {
                    if let Some(summary) = session.autoplay_tick() {
                        ended = Some(summary);
                        return LoopControl::Stop;
                    }
                }
                if now >= MAX_DEMO_MS {
                    LoopControl::Stop
                } else {
                    LoopControl::Continue
                }
            });
        }

        match ended {
            Some(summary) => {
                log::info!(
                    "{} ended ({:?}) with {} after {:.1}s",
                    G::KIND,
                    summary.reason,
                    summary.score,
                    now / 1000.0
                );
                if session.prompt_open() {
                    session
                        .submit_identity(Identity::new("Autopilot", ""))
                        .context("submitting demo score")?;
                }
            }
            None => log::info!("{} still alive after {:.0}s with {}", G::KIND, now / 1000.0, session.score()),
        }
        println!("{}: score {}, best {}", G::KIND, session.score(), session.best());

        let records = session.records().clone();
        let leaderboard = session.leaderboard().clone();
        Ok((records, leaderboard))
    }

    /// Perfect play on both sides always ends in a draw
    fn tictactoe_self_play() -> Result<()> {
        let mut board = Board::new();
        let mut mark = Mark::Human;
        while let Some(slot) = best_move_for(&board, mark) {
            board.place(slot, mark)?;
            mark = mark.opponent();
        }
        let result = match board.winner() {
            Some((winner, line)) => format!("{} wins on {:?}", winner.symbol(), line),
            None => "draw".to_string(),
        };
        log::info!("TicTacToe self-play: {}", result);
        println!("TicTacToe:\n{}\n{}", board, result);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Mello Arcade (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => mello_arcade::Tuning::load_file(std::path::Path::new(&path))
            .context("loading tuning override")?,
        None => mello_arcade::Tuning::default(),
    };

    demo::run(tuning)
}
