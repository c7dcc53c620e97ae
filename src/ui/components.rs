/// Reusable UI components shared by the notes and Q&A pages

use yew::prelude::*;

use crate::chat::{ChatMessage, ConfidenceTier, MessageKind};
use crate::notes_data::NoteStats;

#[derive(Properties, PartialEq)]
pub struct ConfidenceBadgeProps {
    pub confidence: Option<f64>,
}

/// Badge annotating an AI reply with the backend-reported confidence tier.
/// Renders nothing for zero or absent scores.
#[function_component(ConfidenceBadge)]
pub fn confidence_badge(props: &ConfidenceBadgeProps) -> Html {
    match ConfidenceTier::from_score(props.confidence) {
        Some(tier) => {
            let class = match tier {
                ConfidenceTier::High => "confidence-badge confidence-high",
                ConfidenceTier::General => "confidence-badge confidence-general",
            };
            html! {
                <span class={class}>{tier.label()}</span>
            }
        }
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct StatsRowProps {
    pub stats: NoteStats,
}

/// Summary row shown above the rendered outline
#[function_component(StatsRow)]
pub fn stats_row(props: &StatsRowProps) -> Html {
    html! {
        <div class="stats-row">
            <div class="stat-item">
                <span class="stat-value">{props.stats.section_count}</span>
                <span class="stat-label">{"sections"}</span>
            </div>
            <div class="stat-item">
                <span class="stat-value">{props.stats.total_points}</span>
                <span class="stat-label">{"key points"}</span>
            </div>
            <div class="stat-item">
                <span class="stat-value">{props.stats.word_count}</span>
                <span class="stat-label">{"words"}</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ChatBubbleProps {
    pub message: ChatMessage,
}

/// A single transcript entry: sender, body, timestamp and, for AI replies,
/// the confidence badge
#[function_component(ChatBubble)]
pub fn chat_bubble(props: &ChatBubbleProps) -> Html {
    let message = &props.message;

    let bubble_class = match message.kind {
        MessageKind::User => "chat-bubble chat-user",
        MessageKind::Ai => "chat-bubble chat-ai",
        MessageKind::System => "chat-bubble chat-system",
    };

    html! {
        <div class={bubble_class}>
            <div class="chat-meta">
                <span class="chat-sender">{message.kind.sender()}</span>
                <span class="chat-time">{format_time(message.timestamp)}</span>
                if message.kind == MessageKind::Ai {
                    <ConfidenceBadge confidence={message.confidence} />
                }
            </div>
            <p class="chat-content">{&message.content}</p>
        </div>
    }
}

/// HH:MM display for a millisecond epoch timestamp
fn format_time(timestamp: f64) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp));
    format!("{:02}:{:02}", date.get_hours(), date.get_minutes())
}
