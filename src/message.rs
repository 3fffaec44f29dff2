use crate::state::Message as Msg;
use chrono::{DateTime, Local};
use leptos::*;
use pulldown_cmark_escape::escape_html;

/// Assistant text is markdown, user text is shown as typed.
pub fn render_html(message: &Msg) -> String {
    let mut parsed = String::new();
    if message.is_user {
        parsed.push_str("<p>");
        let _ = escape_html(&mut parsed, &message.text);
        parsed.push_str("</p>");
    } else {
        let parser = pulldown_cmark::Parser::new(&message.text);
        pulldown_cmark::html::push_html(&mut parsed, parser);
    }
    parsed
}

#[component]
pub fn Message(message: Msg) -> impl IntoView {
    let parsed = render_html(&message);
    let datemsg = format!("{}", DateTime::<Local>::from(message.timestamp).format("%H:%M"));
    let is_user = message.is_user;
    let (avatar, bubble, time) = if is_user {
        (
            "bg-blue-600 ml-3",
            "bg-blue-600 text-white rounded-br-md",
            "text-blue-100",
        )
    } else {
        (
            "bg-emerald-600 mr-3",
            "bg-gray-100 dark:bg-gray-700 text-gray-900 dark:text-white rounded-bl-md",
            "text-gray-500 dark:text-gray-400",
        )
    };
    view! {
        <div class="flex" class:justify-end=is_user class:justify-start=!is_user>
            <div class="flex max-w-[80%]" class:flex-row-reverse=is_user>
                <div class=format!(
                    "w-10 h-10 rounded-full flex items-center justify-center flex-shrink-0 {avatar}",
                )>
                    {if is_user {
                        view! { <UserIcon /> }.into_view()
                    } else {
                        view! { <BotIcon /> }.into_view()
                    }}
                </div>
                <div class=format!("px-5 py-3 rounded-2xl {bubble}")>
                    <div class="text-sm leading-relaxed" inner_html=parsed />
                    <p class=format!("text-xs mt-2 {time}")>{datemsg}</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn BotIcon() -> impl IntoView {
    view! {
        <svg
            class="w-5 h-5 text-white"
            aria-hidden="true"
            xmlns="http://www.w3.org/2000/svg"
            fill="none"
            viewBox="0 0 24 24"
        >
            <path
                stroke="currentColor"
                stroke-linecap="round"
                stroke-linejoin="round"
                stroke-width="2"
                d="M12 8V4H8M4 12h16a2 2 0 0 1 2 2v4a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2v-4a2 2 0 0 1 2-2Zm5 3v1m6-1v1"
            />
        </svg>
    }
}

#[component]
pub fn UserIcon() -> impl IntoView {
    view! {
        <svg
            class="w-5 h-5 text-white"
            aria-hidden="true"
            xmlns="http://www.w3.org/2000/svg"
            fill="none"
            viewBox="0 0 24 24"
        >
            <path
                stroke="currentColor"
                stroke-linecap="round"
                stroke-linejoin="round"
                stroke-width="2"
                d="M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2M12 11a4 4 0 1 0 0-8 4 4 0 0 0 0 8Z"
            />
        </svg>
    }
}
