use crate::utils::*;
use arcade_core::{
    Coord, Coord2, MinesweeperConfig, MinesweeperEngine, MinesweeperIntent, MinesweeperState,
    MinesweeperView, Simulation, TileView,
};
use bitflags::bitflags;
use gloo::timers::callback::Interval;
use yew::prelude::*;

fn format_for_counter(num: u32) -> String {
    match num {
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CellPointerState {
    pos: Coord2,
    buttons: MouseButtons,
}

impl CellPointerState {
    /// What releasing the pressed buttons over the same cell asks for.
    fn intent(self) -> Option<MinesweeperIntent> {
        if self.buttons == MouseButtons::LEFT {
            Some(MinesweeperIntent::Reveal(self.pos))
        } else if self.buttons == MouseButtons::RIGHT {
            Some(MinesweeperIntent::ToggleFlag(self.pos))
        } else {
            None
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    Press(CellPointerState),
    Release(Coord2),
    Leave,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    Tick,
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    x: Coord,
    y: Coord,
    tile: TileView,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        x,
        y,
        tile,
        pressed,
        callback,
    } = props.clone();

    let mut class = classes!("cell", tile.class_name());
    if pressed {
        class.push("pressed");
    }

    let onmousedown = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            callback.emit(CellMsg::Press(CellPointerState {
                pos: (x, y),
                buttons,
            }));
            log::trace!("({}, {}) mouse down ({:?})", x, y, buttons);
        })
    };

    let onmouseup = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            callback.emit(CellMsg::Release((x, y)));
            log::trace!("({}, {}) mouse up", x, y);
        })
    };

    let onmouseleave = Callback::from(move |_: MouseEvent| callback.emit(CellMsg::Leave));

    html! {
        <td {class} {onmousedown} {onmouseup} {onmouseleave}>{tile.glyph()}</td>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct MinesweeperProps {
    pub seed: u64,
}

pub(crate) struct MinesweeperGame {
    engine: MinesweeperEngine,
    pressed: Option<CellPointerState>,
    _clock: Interval,
}

impl MinesweeperGame {
    fn game_state_class(state: MinesweeperState) -> &'static str {
        match state {
            MinesweeperState::Unstarted => "not-started",
            MinesweeperState::InProgress => "in-progress",
            MinesweeperState::Won => "win",
            MinesweeperState::Lost => "lose",
        }
    }

    fn release(&mut self, pos: Coord2) -> bool {
        let Some(pressed) = self.pressed.take() else {
            return false;
        };
        if pressed.pos != pos {
            return true;
        }
        match pressed.intent() {
            Some(intent) => {
                log::debug!("{:?}", intent);
                self.engine.apply(intent);
                true
            }
            None => true,
        }
    }
}

impl Component for MinesweeperGame {
    type Message = Msg;
    type Properties = MinesweeperProps;

    fn create(ctx: &Context<Self>) -> Self {
        let engine = MinesweeperEngine::new(MinesweeperConfig::default(), ctx.props().seed);

        let link = ctx.link().clone();
        let millis = engine.tick_interval().as_millis() as u32;
        let clock = Interval::new(millis, move || link.send_message(Msg::Tick));

        Self {
            engine,
            pressed: None,
            _clock: clock,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Press(state)) => self.pressed.replace(state) != Some(state),
            CellEvent(Release(pos)) => self.release(pos),
            CellEvent(Leave) => self.pressed.take().is_some(),
            Tick => self.engine.step().has_update(),
            NewGame => {
                self.engine.reset();
                self.pressed = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let view = MinesweeperView::from_engine(&self.engine);
        let (cols, rows) = view.size;
        let flags_left = format_for_counter(view.flags_left.into());
        let elapsed_time = format_for_counter(view.elapsed_secs);
        let game_state_class = Self::game_state_class(view.state);
        let playable = !view.state.is_finished();

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        let overlay = view.overlay().map(|text| {
            let onclick = cb_new_game.clone();
            html! { <Overlay {text} action="Play again" {onclick}/> }
        });

        html! {
            <section class="game minesweeper" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <aside>{flags_left}</aside>
                    <span><button class={game_state_class} onclick={cb_new_game}/></span>
                    <aside>{elapsed_time}</aside>
                </nav>
                <div class="board">
                    <table class={playable.then_some("playable")}>
                        {
                            for (0..rows).map(|y| html! {
                                <tr>
                                    {
                                        for (0..cols).map(|x| {
                                            let tile = view.tile_at((x, y));
                                            let pressed = playable
                                                && tile == TileView::Hidden
                                                && self.pressed.and_then(CellPointerState::intent)
                                                    == Some(MinesweeperIntent::Reveal((x, y)));
                                            let callback = ctx.link().callback(Msg::CellEvent);
                                            html! {
                                                <CellView {x} {y} {tile} {pressed} {callback}/>
                                            }
                                        })
                                    }
                                </tr>
                            })
                        }
                    </table>
                    {for overlay}
                </div>
            </section>
        }
    }
}
