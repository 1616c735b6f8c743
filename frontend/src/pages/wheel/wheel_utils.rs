use wheel_shared::history::DrawRecord;
use wheel_shared::prize_pool::Rarity;
use wheel_shared::{PrizePool, SpinOutcome};
use yew::prelude::*;

use crate::styles;

// Result display component
#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub outcome: Option<SpinOutcome>,
    pub username: String,
}

#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    let Some(outcome) = &props.outcome else {
        return html! {};
    };

    let message = if props.username.is_empty() {
        format!("The wheel landed on {}!", outcome.prize.label())
    } else {
        format!("{} won {}!", props.username, outcome.prize.label())
    };

    html! {
        <div class="mt-8 mb-4 flex flex-col items-center justify-center">
            <div
                class="flex items-center justify-center px-6 py-4 rounded-xl text-white font-bold text-xl shadow-lg border-2 border-white/40 animate-bounce"
                style={format!("background-color: {}", outcome.prize.color())}
            >
                <span>{message}</span>
            </div>
        </div>
    }
}

// Spin button component
#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub disabled: bool,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let button_text = if props.is_spinning { "Spinning..." } else { "Spin" };
    let is_disabled = props.is_spinning || props.disabled;

    let button_class = if is_disabled {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl"
    };

    html! {
        <button
            type="submit"
            disabled={is_disabled}
            class={classes!(
                "w-full",
                "px-8",
                "py-4",
                "rounded-full",
                "font-bold",
                "text-lg",
                "transition-all",
                "duration-300",
                button_class
            )}
        >
            <span>{button_text}</span>
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct PrizeLegendProps {
    pub pool: PrizePool,
}

#[function_component(PrizeLegend)]
pub fn prize_legend(props: &PrizeLegendProps) -> Html {
    let percentages = props.pool.percentages();

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-3 mt-4">
            { for props.pool.entries().iter().zip(percentages).map(|(entry, percent)| {
                let rarity = Rarity::from_percent(percent);
                html! {
                    <div
                        class="bg-white dark:bg-gray-800 p-3 rounded-lg shadow-sm flex items-center border-l-4"
                        style={format!("border-color: {}", entry.color())}
                    >
                        <div
                            class="w-4 h-4 rounded-full mr-3 flex-shrink-0"
                            style={format!("background-color: {}", entry.color())}
                        ></div>
                        <div class="text-left">
                            <div class="font-medium text-gray-900 dark:text-white">{entry.label()}</div>
                            <div class="text-xs" style={format!("color: {}", rarity.color())}>
                                {format!("{:.1}% chance ({})", percent, rarity.name())}
                            </div>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct WinnersListProps {
    pub records: Vec<DrawRecord>,
}

#[function_component(WinnersList)]
pub fn winners_list(props: &WinnersListProps) -> Html {
    html! {
        <div class={classes!(styles::CARD, "mt-8")}>
            <h3 class={styles::TEXT_H3}>{"Recent Winners"}</h3>
            if props.records.is_empty() {
                <p class={classes!(styles::TEXT_SMALL, "mt-3")}>{"No winners yet."}</p>
            } else {
                <ul class="mt-3 divide-y divide-gray-100 dark:divide-gray-700">
                    { for props.records.iter().map(|record| html! {
                        <li class="flex items-center justify-between py-2">
                            <span class="font-medium text-gray-900 dark:text-white">{&record.username}</span>
                            <span class="text-sm font-semibold" style={format!("color: {}", record.prize_color)}>
                                {&record.prize_label}
                            </span>
                            <span class={styles::TEXT_SMALL}>{format_drawn_at(&record.drawn_at)}</span>
                        </li>
                    }) }
                </ul>
            }
        </div>
    }
}

// Shows local wall-clock time, falling back to the raw timestamp
fn format_drawn_at(drawn_at: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(drawn_at)
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| drawn_at.to_string())
}
