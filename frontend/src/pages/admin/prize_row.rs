use web_sys::HtmlInputElement;
use wheel_shared::constants::SLIDER_MAX_WEIGHT;
use wheel_shared::prize_editor::PrizeUpdate;
use wheel_shared::prize_pool::{PrizeEntry, Rarity};
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct PrizeRowProps {
    pub index: usize,
    pub entry: PrizeEntry,
    pub percent: f64,
    pub on_update: Callback<(usize, PrizeUpdate)>,
    pub on_weight: Callback<(usize, f64)>,
    pub on_remove: Callback<usize>,
}

#[function_component(PrizeRow)]
pub fn prize_row(props: &PrizeRowProps) -> Html {
    let index = props.index;
    let rarity = Rarity::from_percent(props.percent);

    let on_label = {
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_update.emit((
                index,
                PrizeUpdate { label: Some(input.value()), ..Default::default() },
            ));
        })
    };

    let on_color = {
        let on_update = props.on_update.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_update.emit((
                index,
                PrizeUpdate { color: Some(input.value()), ..Default::default() },
            ));
        })
    };

    let on_slider = {
        let on_weight = props.on_weight.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_weight.emit((index, input.value_as_number()));
        })
    };

    let on_remove = {
        let on_remove = props.on_remove.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(index))
    };

    html! {
        <div class="grid grid-cols-12 gap-3 items-center py-3 border-b border-gray-100 dark:border-gray-700">
            <input
                type="color"
                class="col-span-1 h-9 w-9 rounded cursor-pointer"
                value={props.entry.color().to_string()}
                onchange={on_color}
            />
            <input
                class={classes!(styles::INPUT, "col-span-4", "mt-0")}
                value={props.entry.label().to_string()}
                onchange={on_label}
            />
            <input
                type="range"
                class="col-span-3"
                min="0"
                max={SLIDER_MAX_WEIGHT.to_string()}
                step="1"
                value={props.entry.weight().to_string()}
                oninput={on_slider}
            />
            <span class="col-span-1 text-sm font-semibold text-gray-900 dark:text-white">
                {format!("{:.1}%", props.percent)}
            </span>
            <span class="col-span-2 text-xs font-semibold" style={format!("color: {}", rarity.color())}>
                {rarity.name()}
            </span>
            <button class={classes!(styles::BUTTON_DANGER, "col-span-1")} onclick={on_remove}>{"Remove"}</button>
        </div>
    }
}
