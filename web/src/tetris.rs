use crate::utils::*;
use arcade_core::{
    RunState, Scoreboard, Simulation, TETRIS_HIGH_SCORE_KEY, TetrisConfig, TetrisEngine,
    TetrisIntent, TetrisStep, TetrisView, tetris_intent_for_key,
};
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use yew::prelude::*;

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct TetrisProps {
    pub seed: u64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Tick,
    Intent(TetrisIntent),
    Restart,
}

pub(crate) struct TetrisGame {
    engine: TetrisEngine,
    scores: Scoreboard<LocalScores>,
    _ticker: Interval,
    _keys: EventListener,
}

impl TetrisGame {
    /// Persists every line clear that beats the stored best.
    fn record(&mut self, step: TetrisStep) -> bool {
        if step.new_high_score() {
            self.scores.submit(self.engine.score());
        }
        step.has_update()
    }
}

impl Component for TetrisGame {
    type Message = Msg;
    type Properties = TetrisProps;

    fn create(ctx: &Context<Self>) -> Self {
        let scores = Scoreboard::load(LocalScores, TETRIS_HIGH_SCORE_KEY);
        let engine = TetrisEngine::new(TetrisConfig::default(), ctx.props().seed, scores.best())
            .expect("default tetris config must be valid");

        let link = ctx.link().clone();
        let millis = engine.tick_interval().as_millis() as u32;
        let ticker = Interval::new(millis, move || link.send_message(Msg::Tick));
        let keys = keydown_listener(tetris_intent_for_key, ctx.link().callback(Msg::Intent));

        log::debug!("tetris mounted, best: {}", scores.best());
        Self {
            engine,
            scores,
            _ticker: ticker,
            _keys: keys,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Tick => {
                let step = self.engine.step();
                self.record(step)
            }
            Msg::Intent(intent) => {
                let step = self.engine.apply(intent);
                self.record(step)
            }
            Msg::Restart => {
                self.engine.reset();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let view = TetrisView::from_engine(&self.engine);
        let (cols, rows) = view.size;
        let preview = view.next_shape;
        let preview_dim = preview.dim();

        let overlay = view.overlay().map(|text| {
            let (action, onclick) = match view.run_state {
                RunState::Over => (
                    "Play again",
                    ctx.link().callback(|_: MouseEvent| Msg::Restart),
                ),
                _ => (
                    "Resume",
                    ctx.link()
                        .callback(|_: MouseEvent| Msg::Intent(TetrisIntent::TogglePause)),
                ),
            };
            html! { <Overlay {text} {action} {onclick}/> }
        });

        html! {
            <section class="game tetris">
                <ScoreLine score={view.score} high_score={view.high_score}/>
                <div class="board">
                    <table>
                        {
                            for (0..rows).map(|y| html! {
                                <tr>
                                    {
                                        for (0..cols).map(|x| html! {
                                            <td class={view.cell_at((x, y)).class_name()}/>
                                        })
                                    }
                                </tr>
                            })
                        }
                    </table>
                    {for overlay}
                </div>
                <aside class="next">
                    <table>
                        {
                            for (0..preview_dim).map(|row| html! {
                                <tr>
                                    {
                                        for (0..preview_dim).map(|col| {
                                            let class = if preview.is_filled(row, col) {
                                                view.next.class_name()
                                            } else {
                                                "empty"
                                            };
                                            html! { <td {class}/> }
                                        })
                                    }
                                </tr>
                            })
                        }
                    </table>
                </aside>
                <p class="controls">{"Left/right move, up rotates, down drops, space pauses"}</p>
            </section>
        }
    }
}
