/// Notes page: drives the /generate_notes poll chain, renders the parsed
/// outline, and exposes the download/copy/print affordances

use patternfly_yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, NotesResponse};
use crate::export;
use crate::notes_data::{NoteStats, Section};
use crate::outline;
use crate::ui::components::StatsRow;

// Import JS bridge functions
#[wasm_bindgen(module = "/notes.js")]
extern "C" {
    fn exportToFile(data: &str, filename: &str);

    #[wasm_bindgen(catch)]
    async fn copyToClipboard(text: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn openPrintWindow(html: &str) -> Result<(), JsValue>;
}

/// Attempts before the poll chain gives up on "processing" responses
const MAX_RETRIES: u32 = 10;
/// Delay between poll attempts, in milliseconds
const RETRY_DELAY_MS: i32 = 3000;

/// What the poll chain does after a "processing" response on the given
/// 1-based poll number
#[derive(Debug, Clone, Copy, PartialEq)]
enum RetryDecision {
    PollAgain,
    GiveUp,
}

/// At most MAX_RETRIES polls are issued; the poll after the cap never goes
/// out, the chain reports a terminal error instead
fn retry_decision(polls_issued: u32) -> RetryDecision {
    if polls_issued >= MAX_RETRIES {
        RetryDecision::GiveUp
    } else {
        RetryDecision::PollAgain
    }
}

#[derive(Clone, PartialEq)]
enum NotesState {
    Idle,
    Loading,
    Processing(u32), // polls issued so far
    Ready,
    Error(String),
}

#[function_component(NotesPage)]
pub fn notes_page() -> Html {
    let state = use_state(|| NotesState::Idle);
    let sections = use_state(Vec::<Section>::new);
    let stats = use_state(|| None::<NoteStats>);

    let is_busy = matches!(*state, NotesState::Loading | NotesState::Processing(_));

    // Generate notes handler: one poll chain at a time, the button is inert
    // while it runs
    let on_generate = {
        let state = state.clone();
        let sections = sections.clone();
        let stats = stats.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let sections = sections.clone();
            let stats = stats.clone();

            state.set(NotesState::Loading);

            spawn_local(async move {
                run_generation(state, sections, stats).await;
            });
        })
    };

    // Clear handler: discard the tree and return to the placeholder
    let on_clear = {
        let state = state.clone();
        let sections = sections.clone();
        let stats = stats.clone();

        Callback::from(move |_| {
            sections.set(Vec::new());
            stats.set(None);
            state.set(NotesState::Idle);
        })
    };

    // Download handler: plain-text export with a timestamped filename
    let on_download = {
        let sections = sections.clone();

        Callback::from(move |_| {
            let text = export::format_notes(&sections);
            let filename = format!("video_notes_{}.txt", js_sys::Date::now() as i64);
            exportToFile(&text, &filename);
        })
    };

    // Copy handler: same plain-text layout, to the clipboard
    let on_copy = {
        let sections = sections.clone();

        Callback::from(move |_| {
            let text = export::format_notes(&sections);

            spawn_local(async move {
                if let Err(e) = copyToClipboard(&text).await {
                    log::error!("Copy failed: {:?}", e);
                }
            });
        })
    };

    // Print handler: standalone HTML document in a new window
    let on_print = {
        let sections = sections.clone();

        Callback::from(move |_| {
            let html = export::print_document(&sections);
            if let Err(e) = openPrintWindow(&html) {
                log::error!("Print failed: {:?}", e);
            }
        })
    };

    html! {
        <div class="container">
            <div class="header">
                <h1 class="main-title">{"Video Notes"}</h1>
                <div class="header-actions">
                    <Button onclick={on_generate} disabled={is_busy} variant={ButtonVariant::Primary}>
                        {"📝 Generate Notes"}
                    </Button>
                    <Button onclick={on_clear} disabled={is_busy} variant={ButtonVariant::Secondary}>
                        {"♻️ Clear"}
                    </Button>
                </div>
            </div>

            // Status display
            {match &*state {
                NotesState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Generating notes..."}</p>
                    </div>
                },
                NotesState::Processing(attempt) => html! {
                    <div class="message-container">
                        <p class="message-text">
                            {format!("Video is still being processed (attempt {}/{})...", attempt, MAX_RETRIES)}
                        </p>
                        <Progress value={(*attempt as f64 / MAX_RETRIES as f64) * 100.0} />
                    </div>
                },
                NotesState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                NotesState::Idle | NotesState::Ready => html! {}
            }}

            // Outline and export affordances
            if matches!(*state, NotesState::Ready) {
                if let Some(stats) = *stats {
                    <StatsRow {stats} />
                }

                <div class="export-actions">
                    <Button onclick={on_download} variant={ButtonVariant::Secondary}>
                        {"📥 Download"}
                    </Button>
                    <Button onclick={on_copy} variant={ButtonVariant::Secondary}>
                        {"📋 Copy"}
                    </Button>
                    <Button onclick={on_print} variant={ButtonVariant::Secondary}>
                        {"🖨️ Print"}
                    </Button>
                </div>

                <div class="notes-outline">
                    {render_sections(&sections)}
                </div>
            } else if matches!(*state, NotesState::Idle) {
                <div class="empty-state">
                    <p>{"No notes yet."}</p>
                    <p class="empty-state-hint">{"Process a video, then generate study notes here."}</p>
                </div>
            }
        </div>
    }
}

/// Render the outline tree as styled markup
fn render_sections(sections: &[Section]) -> Html {
    html! {
        <>
            {for sections.iter().enumerate().map(|(i, section)| html! {
                <div key={format!("section-{}", i)} class="note-section">
                    <h2 class="section-title">{&section.title}</h2>

                    {for section.content.iter().map(|paragraph| html! {
                        <p class="section-paragraph">{paragraph}</p>
                    })}

                    if let Some(points) = &section.points {
                        <ol class="key-points-list">
                            {for points.iter().map(|point| html! {
                                <li>{point}</li>
                            })}
                        </ol>
                    }

                    {for section.subsections.iter().map(|subsection| html! {
                        <div class="note-subsection">
                            <h3 class="subsection-title">{&subsection.title}</h3>
                            if !subsection.points.is_empty() {
                                <ul class="subsection-points">
                                    {for subsection.points.iter().map(|point| html! {
                                        <li>{point}</li>
                                    })}
                                </ul>
                            }
                        </div>
                    })}
                </div>
            })}
        </>
    }
}

// Helper functions

/// Poll /generate_notes until notes arrive, the backend reports an error, or
/// the retry cap is hit. At most MAX_RETRIES polls are ever issued.
async fn run_generation(
    state: UseStateHandle<NotesState>,
    sections: UseStateHandle<Vec<Section>>,
    stats: UseStateHandle<Option<NoteStats>>,
) {
    for attempt in 1..=MAX_RETRIES {
        match api::post_json::<NotesResponse>(api::GENERATE_NOTES_URL, None).await {
            Ok(NotesResponse::Success {
                notes,
                word_count,
                processing_time,
            }) => {
                if let Some(seconds) = processing_time {
                    log::info!("Notes generated in {:.2}s", seconds);
                }

                let tree = outline::parse(&notes);
                stats.set(Some(export::compute_stats(&tree, &notes, word_count)));
                sections.set(tree);
                state.set(NotesState::Ready);
                return;
            }
            Ok(NotesResponse::Processing { message }) => {
                log::info!(
                    "Notes not ready (poll {}/{}): {}",
                    attempt,
                    MAX_RETRIES,
                    message.as_deref().unwrap_or("no detail")
                );

                match retry_decision(attempt) {
                    RetryDecision::GiveUp => {
                        state.set(NotesState::Error(
                            "Notes are taking too long to generate. Please try again later."
                                .to_string(),
                        ));
                        return;
                    }
                    RetryDecision::PollAgain => {
                        state.set(NotesState::Processing(attempt));
                        api::sleep(RETRY_DELAY_MS).await;
                    }
                }
            }
            Ok(NotesResponse::Error { message, error }) => {
                state.set(NotesState::Error(NotesResponse::error_text(message, error)));
                return;
            }
            Err(e) => {
                log::error!("Notes request failed: {}", e);
                state.set(NotesState::Error(format!("Request failed: {}", e)));
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_decision_below_cap_polls_again() {
        for polls_issued in 1..MAX_RETRIES {
            assert_eq!(retry_decision(polls_issued), RetryDecision::PollAgain);
        }
    }

    #[test]
    fn test_retry_decision_at_cap_gives_up() {
        assert_eq!(retry_decision(MAX_RETRIES), RetryDecision::GiveUp);
    }

    #[test]
    fn test_exactly_ten_polls_issued_against_a_stuck_backend() {
        // Backend answers "processing" forever: count the polls the chain
        // would issue before surfacing the terminal error
        let mut polls_issued = 0;
        loop {
            polls_issued += 1;
            match retry_decision(polls_issued) {
                RetryDecision::GiveUp => break,
                RetryDecision::PollAgain => {}
            }
        }

        assert_eq!(polls_issued, 10);
    }
}
