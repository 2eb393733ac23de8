use std::sync::Arc;

use gloo::timers::callback::{Interval, Timeout};
use hanbunko_core as game;
use yew::prelude::*;

use crate::board::{format_for_counter, grid_view};
use crate::utils::*;

/// How long a scored grid stays up before the next deal.
const NEXT_GRID_DELAY_MS: u32 = 1_000;

/// The meta-game owns the clocks and the difficulty ramp, so round ends
/// change nothing inside the session.
fn versus_rules() -> game::SessionRules {
    let inert = game::EndRule {
        advance_difficulty: false,
        grant_secs: 0,
        keep_timer: false,
    };
    game::SessionRules {
        policy: game::RoundPolicy {
            on_win: inert,
            on_skip: inert,
        },
        ..game::SessionRules::default()
    }
}

pub(crate) enum Msg {
    Accept(game::Player),
    Tile(game::TileIx),
    TurnTick,
    RoundEnded(game::RoundEnd),
    NextGrid,
    NewMatch,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct VersusProps {
    pub pool: Arc<game::WordPool>,
    #[prop_or_default]
    pub seed: Option<u64>,
}

/// Hot-seat versus screen: one shared grid, accept to claim it, solve it
/// inside the turn clock or hand the point to the opponent.
pub(crate) struct VersusView {
    session: game::GameSession<IdleTicker>,
    versus: game::VersusMatch,
    turn_clock: Option<Interval>,
    _next_grid: Option<Timeout>,
}

impl Component for VersusView {
    type Message = Msg;
    type Properties = VersusProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("versus session seed: {}", seed);

        let mut session = game::GameSession::new(
            props.pool.clone(),
            versus_rules(),
            game::Difficulty::default(),
            IdleTicker,
            seed,
        );
        let link = ctx.link().clone();
        session.set_end_handler(Box::new(move |end| {
            link.send_message(Msg::RoundEnded(end.clone()));
        }));

        let mut view = Self {
            session,
            versus: game::VersusMatch::default(),
            turn_clock: None,
            _next_grid: None,
        };
        view.deal_grid();
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Accept(player) => match self.versus.accept(player) {
                Ok(game::AcceptOutcome::Claimed) => {
                    if let Err(err) = self.session.unlock() {
                        log::error!("could not open the grid: {}", err);
                    }
                    let link = ctx.link().clone();
                    self.turn_clock = Some(Interval::new(IntervalTicker::PERIOD_MS, move || {
                        link.send_message(TurnTick)
                    }));
                    true
                }
                Ok(game::AcceptOutcome::NoChange) => false,
                Err(err) => {
                    log::debug!("accept rejected: {}", err);
                    false
                }
            },
            Tile(ix) => match self.session.select_tile(ix) {
                Ok(outcome) => outcome.has_update(),
                Err(err) => {
                    log::debug!("selection rejected: {}", err);
                    false
                }
            },
            TurnTick => match self.versus.tick_turn() {
                game::TickOutcome::Expired => {
                    // scoring then comes back through the round-end handler
                    if let Err(err) = self.session.abort_round(game::TURN_TIME_CAUSE) {
                        log::error!("could not expire the turn: {}", err);
                    }
                    true
                }
                outcome => outcome.has_update(),
            },
            RoundEnded(end) => {
                self.turn_clock = None;
                match self.versus.score_round(end.won) {
                    Ok(game::VersusOutcome::NextGrid { scorer }) => {
                        log::debug!("point to {}", scorer);
                        let link = ctx.link().clone();
                        self._next_grid = Some(Timeout::new(NEXT_GRID_DELAY_MS, move || {
                            link.send_message(NextGrid)
                        }));
                        true
                    }
                    Ok(game::VersusOutcome::MatchWon { winner }) => {
                        log::debug!("match won by {}", winner);
                        true
                    }
                    Err(err) => {
                        log::debug!("round not scored: {}", err);
                        true
                    }
                }
            }
            NextGrid => {
                self._next_grid = None;
                self.deal_grid();
                true
            }
            NewMatch => {
                self.versus.restart();
                self.deal_grid();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use game::Player::*;

        let turn = match self.versus.turn_secs_left() {
            Some(secs) => format_for_counter(secs),
            None => "---".to_string(),
        };
        let on_tile = ctx.link().callback(Msg::Tile);
        let playable = self.versus.phase().turn_holder().is_some()
            && self
                .session
                .round()
                .is_some_and(|round| !round.is_finished() && !round.is_locked());

        html! {
            <div class={classes!("board", "versus")}>
                <nav>
                    <aside title={"Player 1 score"}>{format_for_counter(self.versus.score_of(One))}</aside>
                    <span class={"turn-clock"}>{turn}</span>
                    <aside title={"Player 2 score"}>{format_for_counter(self.versus.score_of(Two))}</aside>
                </nav>
                <p class={"message"}>{self.message()}</p>
                {
                    match self.session.round() {
                        Some(round) => grid_view(round, playable, on_tile),
                        None => html! {},
                    }
                }
                { self.view_controls(ctx) }
            </div>
        }
    }
}

impl VersusView {
    fn deal_grid(&mut self) {
        let start = game::RoundStart {
            pool_override: Some(self.versus.next_pool_size()),
            timer: game::TimerStart::Deferred,
        };
        if let Err(err) = self.session.start_round(start) {
            log::error!("could not deal a grid: {}", err);
            return;
        }
        if let Err(err) = self.session.lock() {
            log::error!("could not gate the grid: {}", err);
        }
    }

    fn message(&self) -> String {
        use game::VersusPhase::*;

        match self.versus.phase() {
            AwaitingAccept => "Click Accept to claim the grid!".to_string(),
            Solving(player) => format!("{} is solving…", player),
            Decided(winner) => format!("{} wins the match!", winner),
        }
    }

    fn view_controls(&self, ctx: &Context<Self>) -> Html {
        use game::Player::*;

        if self.versus.phase().is_decided() {
            let cb_new_match = ctx.link().callback(|_| Msg::NewMatch);
            return html! {
                <footer>
                    <button onclick={cb_new_match}>{"New match"}</button>
                </footer>
            };
        }

        let accepts_open = self.versus.phase() == game::VersusPhase::AwaitingAccept
            && self
                .session
                .round()
                .is_some_and(|round| !round.is_finished());
        let accept = |player| ctx.link().callback(move |_| Msg::Accept(player));
        html! {
            <footer>
                <button onclick={accept(One)} disabled={!accepts_open}>{"P1 Accept"}</button>
                <button onclick={accept(Two)} disabled={!accepts_open}>{"P2 Accept"}</button>
            </footer>
        }
    }
}
