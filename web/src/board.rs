use hanbunko_core as game;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct TileProps {
    pub ix: game::TileIx,
    pub text: AttrValue,
    #[prop_or_default]
    pub matched: bool,
    #[prop_or_default]
    pub armed: bool,
    pub callback: Callback<game::TileIx>,
}

#[function_component(TileView)]
pub(crate) fn tile_component(props: &TileProps) -> Html {
    let TileProps {
        ix,
        text,
        matched,
        armed,
        callback,
    } = props.clone();

    let class = classes!(
        "tile",
        matched.then_some("matched"),
        armed.then_some("selected"),
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("tile {} clicked", ix);
        callback.emit(ix);
    });

    html! {
        <button {class} {onclick} disabled={matched}>{text}</button>
    }
}

/// Tile row of one round. Selection stays wired while `playable`; the
/// engine's own gate still has the final say on every click.
pub(crate) fn grid_view(round: &game::RoundEngine, playable: bool, on_tile: Callback<game::TileIx>) -> Html {
    html! {
        <section class={classes!("grid", playable.then_some("playable"))}>
            {
                for (0..round.tile_count()).map(|ix| {
                    let text = AttrValue::from(round.tile_text(ix).to_string());
                    let matched = round.cell_at(ix).is_matched();
                    let armed = round.selected_tile() == Some(ix);
                    let callback = on_tile.clone();
                    html! {
                        <TileView {ix} {text} {matched} {armed} {callback}/>
                    }
                })
            }
        </section>
    }
}

pub(crate) fn format_for_counter(num: u32) -> String {
    match num {
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_pad_to_three_digits_and_top_out_at_999() {
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(42), "042");
        assert_eq!(format_for_counter(999), "999");
        assert_eq!(format_for_counter(1_000), "999");
        assert_eq!(format_for_counter(u32::MAX), "999");
    }
}
