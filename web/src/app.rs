use std::sync::Arc;

use hanbunko_core as game;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::loader;
use crate::single::{GameMode, SingleView};
use crate::theme::Theme;
use crate::utils::*;
use crate::versus::VersusView;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Screen {
    Landing,
    Single(GameMode),
    Versus,
}

enum Words {
    Loading,
    Ready(Arc<game::WordPool>),
    Failed(String),
}

pub(crate) enum Msg {
    Loaded(Result<Arc<game::WordPool>, String>),
    Open(Screen),
    Home,
    CycleTheme,
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct AppProps {
    /// Forced session seed from the URL hash, for reproducible rounds.
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct App {
    words: Words,
    screen: Screen,
    theme: Option<Theme>,
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            let loaded = loader::load_word_pool()
                .await
                .map_err(|err| format!("{err:#}"));
            link.send_message(Msg::Loaded(loaded));
        });

        Self {
            words: Words::Loading,
            screen: Screen::Landing,
            theme: LocalOrDefault::local_or_default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Loaded(Ok(pool)) => {
                self.words = Words::Ready(pool);
                true
            }
            Loaded(Err(err)) => {
                log::error!("word list load failed: {}", err);
                self.words = Words::Failed(err);
                true
            }
            Open(screen) => {
                log::debug!("open screen: {:?}", screen);
                self.screen = screen;
                true
            }
            Home => {
                self.screen = Screen::Landing;
                true
            }
            CycleTheme => {
                self.theme = Theme::cycle(self.theme);
                Theme::apply(self.theme);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class={"hanbunko"}>
                { self.view_topbar(ctx) }
                { self.view_screen(ctx) }
            </div>
        }
    }
}

impl App {
    fn view_topbar(&self, ctx: &Context<Self>) -> Html {
        let at_landing = self.screen == Screen::Landing;
        let cb_home = ctx.link().callback(|_| Msg::Home);
        let cb_theme = ctx.link().callback(|_| Msg::CycleTheme);

        html! {
            <header>
                <button class={"navbtn"} onclick={cb_home} disabled={at_landing} title={"Back to the menu"}>{"⌂"}</button>
                <h1>{"hanbunko"}</h1>
                <button class={"navbtn"} onclick={cb_theme} title={"Switch color scheme"}>{Theme::glyph(self.theme)}</button>
            </header>
        }
    }

    fn view_screen(&self, ctx: &Context<Self>) -> Html {
        let pool = match &self.words {
            Words::Loading => {
                return html! { <p class={"notice"}>{"Loading words…"}</p> };
            }
            Words::Failed(err) => {
                return html! {
                    <div class={classes!("notice", "error")}>
                        <p>{"Could not load the word list."}</p>
                        <small>{err}</small>
                    </div>
                };
            }
            Words::Ready(pool) => pool.clone(),
        };

        match self.screen {
            Screen::Landing => self.view_landing(ctx),
            Screen::Single(mode) => html! {
                <SingleView {pool} {mode} seed={ctx.props().seed}/>
            },
            Screen::Versus => html! {
                <VersusView {pool} seed={ctx.props().seed}/>
            },
        }
    }

    fn view_landing(&self, ctx: &Context<Self>) -> Html {
        let open = |screen: Screen| ctx.link().callback(move |_| Msg::Open(screen));

        html! {
            <main class={"landing"}>
                <p>{"Join the two halves of each word before the clock runs out."}</p>
                <button onclick={open(Screen::Single(GameMode::Classic))}>{"Single player"}</button>
                <button onclick={open(Screen::Single(GameMode::Marathon))}>{"Marathon"}</button>
                <button onclick={open(Screen::Versus)}>{"Two players"}</button>
            </main>
        }
    }
}
