use std::sync::Arc;

use gloo::timers::callback::Timeout;
use hanbunko_core as game;
use yew::prelude::*;

use crate::board::{format_for_counter, grid_view};
use crate::utils::*;

/// How long a solved grid stays up before the next deal.
const NEXT_ROUND_DELAY_MS: u32 = 800;

/// Session presets for the two single-player variants.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum GameMode {
    /// Fresh clock each round; any loss ends the run.
    Classic,
    /// One clock across rounds: wins buy extra seconds, skips keep dealing.
    Marathon,
}

impl GameMode {
    const MARATHON_ROUND_SECS: game::Seconds = 60;
    const MARATHON_WIN_BONUS_SECS: game::Seconds = 10;

    fn rules(self) -> game::SessionRules {
        match self {
            Self::Classic => game::SessionRules::default(),
            Self::Marathon => game::SessionRules {
                round_secs: Self::MARATHON_ROUND_SECS,
                policy: game::RoundPolicy::continuous(Self::MARATHON_WIN_BONUS_SECS),
                ..game::SessionRules::default()
            },
        }
    }
}

pub(crate) enum Msg {
    Tile(game::TileIx),
    Tick,
    NextRound,
    PlayAgain,
    NewGame,
    Skip,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct SingleProps {
    pub pool: Arc<game::WordPool>,
    pub mode: GameMode,
    #[prop_or_default]
    pub seed: Option<u64>,
}

struct Banner {
    headline: &'static str,
    detail: Option<String>,
}

pub(crate) struct SingleView {
    session: game::GameSession<IntervalTicker>,
    banner: Option<Banner>,
    _next_round: Option<Timeout>,
}

impl Component for SingleView {
    type Message = Msg;
    type Properties = SingleProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let ticker = IntervalTicker::new(ctx.link().callback(|()| Msg::Tick));
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("single session ({:?}) seed: {}", props.mode, seed);

        let mut session = game::GameSession::new(
            props.pool.clone(),
            props.mode.rules(),
            game::Difficulty::default(),
            ticker,
            seed,
        );
        if let Err(err) = session.start_round(game::RoundStart::default()) {
            log::error!("could not deal the first round: {}", err);
        }

        Self {
            session,
            banner: None,
            _next_round: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Tile(ix) => match self.session.select_tile(ix) {
                Ok(outcome) => {
                    if outcome.is_terminal() {
                        self.on_round_over(ctx);
                    }
                    outcome.has_update()
                }
                Err(err) => {
                    log::debug!("selection rejected: {}", err);
                    false
                }
            },
            Tick => {
                let outcome = self.session.tick();
                if matches!(outcome, game::TickOutcome::Expired) {
                    self.on_round_over(ctx);
                }
                outcome.has_update()
            }
            NextRound => {
                self._next_round = None;
                self.deal(game::TimerStart::Now);
                true
            }
            PlayAgain => {
                self.banner = None;
                if ctx.props().mode == GameMode::Marathon {
                    self.session.reset_progress();
                }
                self.deal(game::TimerStart::Now);
                true
            }
            NewGame => {
                self.banner = None;
                self._next_round = None;
                self.session.reset_progress();
                self.deal(game::TimerStart::Now);
                true
            }
            Skip => match self.session.skip_round() {
                Ok(()) => {
                    self.deal(game::TimerStart::Carry);
                    true
                }
                Err(err) => {
                    log::debug!("skip rejected: {}", err);
                    false
                }
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let stats = self.session.stats();
        let pairs = format_for_counter(stats.pairs_matched);
        let secs = format_for_counter(
            self.session
                .round()
                .map_or(0, game::RoundEngine::remaining_secs),
        );
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });
        let on_tile = ctx.link().callback(Msg::Tile);
        let playable = self
            .session
            .round()
            .is_some_and(|round| !round.is_finished() && !round.is_locked());

        html! {
            <div class={"board"}>
                <nav>
                    <aside title={"Pairs matched"}>{pairs}</aside>
                    <span><button class={self.game_state_class()} onclick={cb_new_game}/></span>
                    <aside title={"Seconds left"}>{secs}</aside>
                </nav>
                {
                    match self.session.round() {
                        Some(round) => grid_view(round, playable, on_tile),
                        None => html! {},
                    }
                }
                { self.view_skip(ctx) }
                { self.view_banner(ctx) }
            </div>
        }
    }
}

impl SingleView {
    fn deal(&mut self, timer: game::TimerStart) {
        let start = game::RoundStart {
            pool_override: None,
            timer,
        };
        if let Err(err) = self.session.start_round(start) {
            log::error!("could not deal a round: {}", err);
        }
    }

    fn on_round_over(&mut self, ctx: &Context<Self>) {
        let Some(end) = self.session.round().and_then(game::RoundEngine::end) else {
            return;
        };
        let end = end.clone();
        let mode = ctx.props().mode;

        match (&end.reason, mode) {
            (game::EndReason::Complete, GameMode::Classic) => {
                // leave the solved grid up briefly, then deal the next one
                let link = ctx.link().clone();
                self._next_round = Some(Timeout::new(NEXT_ROUND_DELAY_MS, move || {
                    link.send_message(Msg::NextRound)
                }));
            }
            (game::EndReason::Complete, GameMode::Marathon) => {
                self.deal(game::TimerStart::Carry);
            }
            (game::EndReason::Time, _) => {
                self.banner = Some(Banner {
                    headline: "Time's up!",
                    detail: self.run_summary(mode),
                });
            }
            (game::EndReason::Wrong { attempted }, _) => {
                self.banner = Some(Banner {
                    headline: "Incorrect match!",
                    detail: Some(format!("{} is not one of the words", attempted)),
                });
            }
            (game::EndReason::Abort { .. }, _) => {}
        }
    }

    fn run_summary(&self, mode: GameMode) -> Option<String> {
        match mode {
            GameMode::Classic => None,
            GameMode::Marathon => Some(format!(
                "Final score: {} pairs",
                self.session.stats().pairs_matched
            )),
        }
    }

    fn game_state_class(&self) -> Classes {
        use game::RoundState::*;

        classes!(match self.session.round().map(game::RoundEngine::state) {
            None | Some(Setup) => "not-started",
            Some(Running) => "in-progress",
            Some(Won) => "win",
            Some(LostMismatch | LostTimeout | Aborted) => "lose",
        })
    }

    fn view_skip(&self, ctx: &Context<Self>) -> Html {
        if ctx.props().mode != GameMode::Marathon {
            return html! {};
        }

        let skippable = self
            .session
            .round()
            .is_some_and(|round| !round.is_finished());
        let cb_skip = ctx.link().callback(|_| Msg::Skip);
        html! {
            <button class={"skip"} onclick={cb_skip} disabled={!skippable}>{"Skip"}</button>
        }
    }

    fn view_banner(&self, ctx: &Context<Self>) -> Html {
        let Some(banner) = &self.banner else {
            return html! {};
        };

        let cb_again = ctx.link().callback(|_| Msg::PlayAgain);
        html! {
            <Modal>
                <div class={"overlay"}>
                    <article>
                        <h2>{banner.headline}</h2>
                        if let Some(detail) = &banner.detail {
                            <p>{detail.clone()}</p>
                        }
                        <button onclick={cb_again}>{"Play again"}</button>
                    </article>
                </div>
            </Modal>
        }
    }
}
