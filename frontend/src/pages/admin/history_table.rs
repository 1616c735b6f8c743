use wheel_shared::history::{recent, DrawRecord};
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct HistoryTableProps {
    pub records: Vec<DrawRecord>,
}

/// Every draw this session, newest first.
#[function_component(HistoryTable)]
pub fn history_table(props: &HistoryTableProps) -> Html {
    let rows = recent(&props.records, props.records.len());

    html! {
        <div class={classes!(styles::CARD, "mt-8")}>
            <h2 class={classes!(styles::TEXT_H2, "mb-4")}>
                {format!("Draw History ({})", props.records.len())}
            </h2>
            if rows.is_empty() {
                <p class={styles::TEXT_SMALL}>{"No draws yet."}</p>
            } else {
                <div class="overflow-x-auto">
                    <table class="w-full text-sm text-left text-gray-700 dark:text-gray-300">
                        <thead class="text-xs uppercase text-gray-500 dark:text-gray-400 border-b border-gray-200 dark:border-gray-700">
                            <tr>
                                <th class="py-2 pr-4">{"User"}</th>
                                <th class="py-2 pr-4">{"Prize"}</th>
                                <th class="py-2">{"Date"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for rows.into_iter().map(|record| html! {
                                <tr class="border-b border-gray-100 dark:border-gray-700">
                                    <td class="py-2 pr-4 font-medium text-gray-900 dark:text-white">{&record.username}</td>
                                    <td class="py-2 pr-4">
                                        <span
                                            class="inline-block w-3 h-3 rounded-full mr-2 align-middle"
                                            style={format!("background-color: {}", record.prize_color)}
                                        ></span>
                                        {&record.prize_label}
                                    </td>
                                    <td class="py-2">{format_date(&record.drawn_at)}</td>
                                </tr>
                            }) }
                        </tbody>
                    </table>
                </div>
            }
        </div>
    }
}

fn format_date(drawn_at: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(drawn_at)
        .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| drawn_at.to_string())
}
