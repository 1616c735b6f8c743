use wheel_shared::history::DrawStats;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct DistributionChartProps {
    pub stats: DrawStats,
}

#[function_component(DistributionChart)]
pub fn distribution_chart(props: &DistributionChartProps) -> Html {
    let stats = &props.stats;

    html! {
        <div class={styles::CARD}>
            <div class="flex items-baseline justify-between">
                <h2 class={styles::TEXT_H2}>{"Prize Distribution"}</h2>
                <span class={styles::TEXT_SMALL}>{format!("{} draws this session", stats.total_draws)}</span>
            </div>
            if stats.distribution.is_empty() {
                <p class={classes!(styles::TEXT_SMALL, "mt-4")}>{"No draws yet."}</p>
            } else {
                <div class="mt-4 space-y-3">
                    { for stats.distribution.iter().map(|row| html! {
                        <div>
                            <div class="flex justify-between text-sm text-gray-700 dark:text-gray-300">
                                <span class="font-medium">{&row.label}</span>
                                <span>{format!("{} wins, {} pts", row.count, row.total_points)}</span>
                            </div>
                            <div class="w-full bg-gray-200 dark:bg-gray-700 rounded-full h-2.5 mt-1">
                                <div
                                    class="bg-gradient-to-r from-yellow-400 to-orange-500 h-2.5 rounded-full transition-all duration-500"
                                    style={format!("width: {:.1}%", row.bar_percent)}
                                ></div>
                            </div>
                        </div>
                    }) }
                </div>
            }
        </div>
    }
}
