use crate::app::Settings;
use crate::chat::{ChatLog, ChatSession, SendOutcome};
use crate::config::SimulationConfig;
use crate::loading::Loading;
use crate::message::{BotIcon, Message};
use crate::random::BrowserRandom;
use crate::scheduler::BrowserScheduler;
use crate::state::Message as Msg;
use leptos::leptos_dom::ev::SubmitEvent;
use leptos::logging::log;
use leptos::*;
use std::rc::Rc;

/// Chat screen, every mount starts a new session.
#[component]
pub fn ChatBot<F>(on_back: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let settings = expect_context::<Settings>();
    let config = expect_context::<SimulationConfig>();
    let (message, set_message) = create_signal(String::new());
    let (typing, set_typing) = create_signal(false);
    let (messages, set_messages) = create_signal(Vec::<Msg>::new());

    let session = ChatSession::new(
        BrowserScheduler,
        Rc::new(BrowserRandom),
        config,
        move |log: &ChatLog| {
            let _ = set_messages.try_set(log.messages().to_vec());
            let _ = set_typing.try_set(log.is_typing());
        },
    );
    set_messages.set(session.log().messages().to_vec());
    let session = store_value(session);
    on_cleanup(move || session.with_value(|session| session.close()));

    let update_message = move |ev| {
        let v = event_target_value(&ev);
        set_message.set(v);
    };
    let send_message = move |ev: SubmitEvent| {
        ev.prevent_default();
        let content = message.get_untracked();
        match session.with_value(|session| session.send(&content)) {
            SendOutcome::Sent { .. } => set_message.set(String::new()),
            SendOutcome::Ignored(reason) => log!("Message not sent: {reason:?}"),
        }
    };

    view! {
        <div class="max-w-4xl mx-auto">
            <div class="bg-white dark:bg-gray-800 rounded-xl shadow-lg flex flex-col h-[700px]">
                <div class="p-6 border-b border-gray-200 dark:border-gray-700">
                    <div class="flex items-center">
                        <button
                            type="button"
                            class="mr-4 p-2 hover:bg-gray-100 dark:hover:bg-gray-700 rounded-lg transition-colors duration-200 text-gray-600 dark:text-gray-400"
                            aria-label=move || settings.t("chat.back")
                            on:click=move |_| on_back()
                        >
                            <svg
                                class="w-5 h-5"
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
                                    d="M19 12H5m7 7-7-7 7-7"
                                />
                            </svg>
                        </button>
                        <h2 class="text-2xl font-bold text-gray-900 dark:text-white flex items-center">
                            <span class="w-7 h-7 mr-3 rounded-full bg-emerald-600 flex items-center justify-center">
                                <BotIcon />
                            </span>
                            {move || settings.t("chat.title")}
                        </h2>
                    </div>
                    <p class="text-sm text-gray-500 dark:text-gray-400 mt-2 ml-11">
                        {move || settings.t("chat.subtitle")}
                    </p>
                </div>

                <main class="grow flex flex-col-reverse overflow-auto p-6 gap-6">
                    {move || {
                        typing
                            .get()
                            .then(|| {
                                view! {
                                    <div class="flex justify-start">
                                        <div class="w-10 h-10 rounded-full bg-emerald-600 flex items-center justify-center mr-3">
                                            <BotIcon />
                                        </div>
                                        <div class="bg-gray-100 dark:bg-gray-700 px-5 py-3 rounded-2xl rounded-bl-md">
                                            <Loading label=Signal::derive(move || settings.t("chat.typing")) />
                                        </div>
                                    </div>
                                }
                            })
                    }}
                    {move || {
                        messages
                            .get()
                            .into_iter()
                            .rev()
                            .map(|message| {
                                view! { <Message message=message /> }
                            })
                            .collect::<Vec<_>>()
                    }}
                </main>

                <form class="p-6 border-t border-gray-200 dark:border-gray-700" on:submit=send_message>
                    <label for="chat" class="sr-only">
                        {move || settings.t("chat.placeholder")}
                    </label>
                    <div class="flex space-x-4">
                        <input
                            id="chat"
                            type="text"
                            class="flex-1 px-4 py-3 border border-gray-300 dark:border-gray-600 rounded-lg focus:outline-none focus:ring-2 focus:ring-emerald-500 focus:border-transparent bg-white dark:bg-gray-700 text-gray-900 dark:text-white placeholder-gray-500 dark:placeholder-gray-400"
                            placeholder=move || settings.t("chat.placeholder")
                            on:input=update_message
                            prop:value=message
                            prop:disabled=typing
                        />
                        <button
                            type="submit"
                            class="px-6 py-3 bg-emerald-600 hover:bg-emerald-700 disabled:bg-gray-300 disabled:cursor-not-allowed text-white rounded-lg transition-colors duration-200 flex items-center font-medium"
                            prop:disabled=move || typing.get() || message.get().trim().is_empty()
                        >
                            <svg
                                class="w-5 h-5 rotate-90 rtl:-rotate-90"
                                aria-hidden="true"
                                xmlns="http://www.w3.org/2000/svg"
                                fill="currentColor"
                                viewBox="0 0 18 20"
                            >
                                <path d="m17.914 18.594-8-18a1 1 0 0 0-1.828 0l-8 18a1 1 0 0 0 1.157 1.376L8 18.281V9a1 1 0 0 1 2 0v9.281l6.758 1.689a1 1 0 0 0 1.156-1.376Z" />
                            </svg>
                            <span class="ml-2 hidden sm:inline">{move || settings.t("chat.send")}</span>
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
