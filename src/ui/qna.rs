/// Q&A page: chat transcript over /ask_question with a readiness check and
/// the one-outstanding-question guard

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::{self, AskRequest, AskResponse, QnaStatus};
use crate::chat::Transcript;
use crate::ui::components::ChatBubble;

#[function_component(QnaPage)]
pub fn qna_page() -> Html {
    let transcript = use_state(Transcript::new);
    let status = use_state(|| None::<QnaStatus>);
    let input_value = use_state(String::new);

    // Check backend readiness on mount and open the transcript with a
    // system notice
    {
        let transcript = transcript.clone();
        let status = status.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match api::get_json::<QnaStatus>(api::QNA_STATUS_URL).await {
                    Ok(qna_status) => {
                        let notice = if qna_status.ready {
                            format!(
                                "Q&A is ready — {} transcript chunks loaded. Ask me anything about the video.",
                                qna_status.chunks_loaded
                            )
                        } else {
                            "The video is still being processed. Answers may be unavailable until processing completes.".to_string()
                        };

                        let mut opened = Transcript::new();
                        opened.record_system(notice, js_sys::Date::now());
                        transcript.set(opened);
                        status.set(Some(qna_status));
                    }
                    Err(e) => {
                        log::error!("Q&A status check failed: {}", e);
                    }
                }
            });
            || ()
        });
    }

    let on_input = {
        let input_value = input_value.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                input_value.set(input.value());
            }
        })
    };

    // Send handler: the guard in Transcript::begin_question plus the
    // disabled control keep at most one question in flight
    let on_send = {
        let transcript = transcript.clone();
        let input_value = input_value.clone();

        Callback::from(move |_: ()| {
            let question = input_value.trim().to_string();
            if question.is_empty() {
                return;
            }

            let mut asked = (*transcript).clone();
            if !asked.begin_question(question.clone(), js_sys::Date::now()) {
                return;
            }
            transcript.set(asked.clone());
            input_value.set(String::new());

            let transcript = transcript.clone();
            spawn_local(async move {
                let mut settled = asked;

                match ask_backend(&question).await {
                    Ok(AskResponse::Success {
                        answer,
                        confidence,
                        has_context,
                    }) => {
                        log::info!(
                            "Answer received (confidence {:.2}, context: {})",
                            confidence,
                            has_context
                        );
                        settled.record_answer(answer, Some(confidence), js_sys::Date::now());
                    }
                    Ok(AskResponse::Error { answer }) => {
                        let notice = answer.unwrap_or_else(|| {
                            "Sorry, something went wrong answering that question.".to_string()
                        });
                        settled.record_system(notice, js_sys::Date::now());
                    }
                    Err(e) => {
                        log::error!("Question request failed: {}", e);
                        settled.record_system(
                            format!("Request failed: {}", e),
                            js_sys::Date::now(),
                        );
                    }
                }

                transcript.set(settled);
            });
        })
    };

    let on_send_click = on_send.reform(|_: MouseEvent| ());

    let on_keypress = {
        let on_send = on_send.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_send.emit(());
            }
        })
    };

    let on_clear = {
        let transcript = transcript.clone();
        Callback::from(move |_| {
            let mut cleared = (*transcript).clone();
            cleared.clear();
            transcript.set(cleared);
        })
    };

    let is_pending = transcript.is_pending();
    let not_ready = matches!(&*status, Some(s) if !s.ready);

    html! {
        <div class="container">
            <div class="header">
                <h1 class="main-title">{"Video Q&A"}</h1>
                <Button onclick={on_clear} disabled={is_pending} variant={ButtonVariant::Secondary}>
                    {"♻️ Clear Chat"}
                </Button>
            </div>

            if not_ready {
                <Alert r#type={AlertType::Warning} title={"Video still processing"} inline={true}>
                    {"Answers will be limited until processing completes."}
                </Alert>
            }

            <div class="chat-transcript">
                if transcript.messages().is_empty() {
                    <div class="empty-state">
                        <p>{"No messages yet."}</p>
                        <p class="empty-state-hint">{"Ask a question about the processed video."}</p>
                    </div>
                } else {
                    {for transcript.messages().iter().map(|message| html! {
                        <ChatBubble key={message.id.clone()} message={message.clone()} />
                    })}
                }

                if is_pending {
                    <div class="chat-pending">
                        <Spinner />
                        <p class="loading-text">{"Thinking..."}</p>
                    </div>
                }
            </div>

            <div class="chat-input-row">
                <input
                    type="text"
                    placeholder="Ask a question about the video..."
                    value={(*input_value).clone()}
                    oninput={on_input}
                    onkeypress={on_keypress}
                    disabled={is_pending}
                    class="chat-input"
                />
                <Button onclick={on_send_click} disabled={is_pending} variant={ButtonVariant::Primary}>
                    {"Send"}
                </Button>
            </div>
        </div>
    }
}

// Helper functions

async fn ask_backend(question: &str) -> Result<AskResponse, String> {
    let body = serde_json::to_string(&AskRequest { question })
        .map_err(|e| format!("Failed to encode question: {}", e))?;

    api::post_json(api::ASK_QUESTION_URL, Some(body)).await
}
