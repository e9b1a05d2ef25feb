use clap::{Parser, ValueEnum};
use wasm_bindgen::prelude::*;
use yew::prelude::*;

mod minesweeper;
mod snake;
mod tetris;
mod utils;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum GameKind {
    #[default]
    Snake,
    Tetris,
    Minesweeper,
}

impl GameKind {
    const ALL: [GameKind; 3] = [Self::Snake, Self::Tetris, Self::Minesweeper];

    const fn title(self) -> &'static str {
        match self {
            Self::Snake => "Snake",
            Self::Tetris => "Tetris",
            Self::Minesweeper => "Minesweeper",
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Game shown first
    #[arg(short, long, value_enum, default_value_t)]
    game: GameKind,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    /// Reads args from a location hash such as `#--game=tetris&--seed=7&-vv`.
    fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct AppProps {
    pub game: GameKind,
    pub seed: u64,
}

pub(crate) enum Msg {
    Select(GameKind),
}

pub(crate) struct App {
    selected: GameKind,
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            selected: ctx.props().game,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let Msg::Select(game) = msg;
        if self.selected == game {
            return false;
        }
        log::debug!("switching to {:?}", game);
        self.selected = game;
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let seed = ctx.props().seed;

        html! {
            <div class="arcade">
                <nav>
                    {
                        for GameKind::ALL.into_iter().map(|game| {
                            let onclick = ctx.link().callback(move |_| Msg::Select(game));
                            let class = (game == self.selected).then_some("active");
                            html! { <button {class} {onclick}>{game.title()}</button> }
                        })
                    }
                </nav>
                {
                    match self.selected {
                        GameKind::Snake => html! { <snake::SnakeGame {seed}/> },
                        GameKind::Tetris => html! { <tetris::TetrisGame {seed}/> },
                        GameKind::Minesweeper => html! { <minesweeper::MinesweeperGame {seed}/> },
                    }
                }
            </div>
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, parse_error) = match Args::from_location_hash(&location_hash) {
        Ok(args) => (Some(args), None),
        Err(err) => (None, Some(err)),
    };
    let log_level = args
        .as_ref()
        .map_or(Some(log::Level::Error), |args| args.verbose.log_level());
    if let Some(log_level) = log_level {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = parse_error {
        log::error!("Could not parse args, using defaults: {}", err);
    }

    let game = args.as_ref().map(|args| args.game).unwrap_or_default();
    let seed = args
        .and_then(|args| args.seed)
        .unwrap_or_else(utils::js_random_seed);
    log::debug!("game: {:?}, seed: {}", game, seed);

    let root = document()
        .get_element_by_id("arcade")
        .expect("Could not find id=\"arcade\" element");

    log::debug!("App started");
    yew::Renderer::<App>::with_root_and_props(root, AppProps { game, seed }).render();
}
