use crate::utils::*;
use arcade_core::{
    RunState, SNAKE_HIGH_SCORE_KEY, Scoreboard, Simulation, SnakeConfig, SnakeEngine, SnakeIntent,
    SnakeStep, SnakeView, snake_intent_for_key,
};
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use yew::prelude::*;

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct SnakeProps {
    pub seed: u64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Tick,
    Intent(SnakeIntent),
    Restart,
}

pub(crate) struct SnakeGame {
    engine: SnakeEngine,
    scores: Scoreboard<LocalScores>,
    _ticker: Interval,
    _keys: EventListener,
}

impl SnakeGame {
    fn record(&mut self, step: SnakeStep) {
        if let SnakeStep::GameOver {
            new_high_score: true,
        } = step
        {
            self.scores.submit(self.engine.score());
        }
    }
}

impl Component for SnakeGame {
    type Message = Msg;
    type Properties = SnakeProps;

    fn create(ctx: &Context<Self>) -> Self {
        let scores = Scoreboard::load(LocalScores, SNAKE_HIGH_SCORE_KEY);
        let engine = SnakeEngine::new(SnakeConfig::default(), ctx.props().seed, scores.best())
            .expect("default snake config must be valid");

        let link = ctx.link().clone();
        let millis = engine.tick_interval().as_millis() as u32;
        let ticker = Interval::new(millis, move || link.send_message(Msg::Tick));
        let keys = keydown_listener(snake_intent_for_key, ctx.link().callback(Msg::Intent));

        log::debug!("snake mounted, best: {}", scores.best());
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
                self.record(step);
                step.has_update()
            }
            Msg::Intent(intent) => self.engine.apply(intent),
            Msg::Restart => {
                self.engine.reset();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let view = SnakeView::from_engine(&self.engine);
        let (cols, rows) = view.size;

        let overlay = view.overlay().map(|text| {
            let (action, onclick) = match view.run_state {
                RunState::Over => (
                    "Play again",
                    ctx.link().callback(|_: MouseEvent| Msg::Restart),
                ),
                _ => (
                    "Resume",
                    ctx.link()
                        .callback(|_: MouseEvent| Msg::Intent(SnakeIntent::TogglePause)),
                ),
            };
            html! { <Overlay {text} {action} {onclick}/> }
        });

        html! {
            <section class="game snake">
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
                <p class="controls">{"Arrows steer, space pauses"}</p>
            </section>
        }
    }
}
