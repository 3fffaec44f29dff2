use crate::app::Settings;
use crate::state::{UploadStatus, UploadedFile};
use leptos::*;
use web_sys::{DragEvent, FileList, HtmlInputElement};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human readable size in powers of 1024, with at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut exponent = 0;
    let mut whole = bytes;
    while whole >= 1024 && exponent < SIZE_UNITS.len() - 1 {
        whole /= 1024;
        exponent += 1;
    }
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[exponent])
}

#[component]
pub fn FileUpload<F, R, I>(
    files: ReadSignal<Vec<UploadedFile>>,
    on_files: F,
    on_remove: R,
    on_interact: I,
) -> impl IntoView
where
    F: Fn(FileList) + Copy + 'static,
    R: Fn(String) + Copy + 'static,
    I: Fn() + Copy + 'static,
{
    let settings = expect_context::<Settings>();
    let (drag_over, set_drag_over) = create_signal(false);

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_over.set(true);
    };
    let on_drag_leave = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_over.set(false);
    };
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_over.set(false);
        if let Some(list) = ev.data_transfer().and_then(|transfer| transfer.files()) {
            if list.length() > 0 {
                on_files(list);
            }
        }
    };
    let on_change = move |ev: ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(list) = input.files() {
            if list.length() > 0 {
                on_files(list);
            }
        }
        // lets the same file be picked again after a removal
        input.set_value("");
    };
    let has_completed = move || files.with(|files| files.iter().any(UploadedFile::is_completed));

    view! {
        <div class="max-w-4xl mx-auto">
            <div class="bg-white dark:bg-gray-800 rounded-xl shadow-lg p-8">
                <h2 class="text-3xl font-bold text-gray-900 dark:text-white mb-8 text-center">
                    {move || settings.t("upload.title")}
                </h2>

                <div
                    class=move || {
                        let state = if drag_over.get() {
                            "border-blue-400 bg-blue-50 dark:bg-blue-900/20"
                        } else {
                            "border-gray-300 dark:border-gray-600 hover:border-gray-400 dark:hover:border-gray-500"
                        };
                        format!(
                            "relative border-2 border-dashed rounded-xl p-12 text-center transition-all duration-300 mb-6 {state}",
                        )
                    }
                    on:dragover=on_drag_over
                    on:dragleave=on_drag_leave
                    on:drop=on_drop
                >
                    <input
                        type="file"
                        multiple
                        class="absolute inset-0 w-full h-full opacity-0 cursor-pointer"
                        on:change=on_change
                    />
                    <div class="flex flex-col items-center space-y-6">
                        <div class=move || {
                            if drag_over.get() {
                                "w-20 h-20 rounded-full flex items-center justify-center transition-colors duration-300 bg-blue-100 dark:bg-blue-800 text-blue-600 dark:text-blue-400"
                            } else {
                                "w-20 h-20 rounded-full flex items-center justify-center transition-colors duration-300 bg-gray-100 dark:bg-gray-700 text-gray-600 dark:text-gray-400"
                            }
                        }>
                            <svg
                                class="w-10 h-10"
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
                                    d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4M17 8l-5-5-5 5M12 3v12"
                                />
                            </svg>
                        </div>
                        <div class="space-y-3">
                            <p class="text-xl font-medium text-gray-900 dark:text-white">
                                {move || settings.t("upload.dragDrop")}
                            </p>
                            <button
                                type="button"
                                class="inline-flex items-center px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-lg transition-colors duration-200 text-lg"
                            >
                                {move || settings.t("upload.selectFiles")}
                            </button>
                        </div>
                    </div>
                </div>

                <div class="space-y-4 mb-6">
                    {move || {
                        files
                            .get()
                            .into_iter()
                            .map(|file| view! { <FileRow file=file on_remove=on_remove /> })
                            .collect::<Vec<_>>()
                    }}
                </div>

                {move || {
                    has_completed()
                        .then(|| {
                            view! {
                                <div class="text-center">
                                    <button
                                        type="button"
                                        class="inline-flex items-center px-8 py-4 bg-emerald-600 hover:bg-emerald-700 text-white font-semibold rounded-lg transition-all duration-200 transform hover:scale-105 shadow-lg hover:shadow-xl"
                                        on:click=move |_| on_interact()
                                    >
                                        <svg
                                            class="w-6 h-6 mr-3"
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
                                                d="M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2Z"
                                            />
                                        </svg>
                                        {move || settings.t("upload.interact")}
                                    </button>
                                    <p class="text-sm text-gray-500 dark:text-gray-400 mt-3">
                                        {move || settings.t("upload.interactHint")}
                                    </p>
                                </div>
                            }
                        })
                }}
            </div>
        </div>
    }
}

#[component]
fn FileRow<R>(file: UploadedFile, on_remove: R) -> impl IntoView
where
    R: Fn(String) + Copy + 'static,
{
    let settings = expect_context::<Settings>();
    let thumbnail = match &file.preview {
        Some(preview) if file.is_pdf() => view! {
            <embed
                src=preview.0.clone()
                type="application/pdf"
                width="80"
                height="100"
                class="rounded-lg border"
            />
        }
        .into_view(),
        Some(preview) if file.is_image() => view! {
            <img
                src=preview.0.clone()
                alt=file.name.clone()
                class="w-16 h-16 object-cover rounded-lg border"
            />
        }
        .into_view(),
        Some(_) => ().into_view(),
        None => view! { <span class="text-2xl">"📄"</span> }.into_view(),
    };
    let status = match file.status {
        UploadStatus::Uploading => view! {
            <div class="w-32" title=move || settings.t("upload.uploading")>
                <div class="bg-gray-200 dark:bg-gray-600 rounded-full h-2">
                    <div
                        class="bg-blue-600 h-2 rounded-full transition-all duration-300"
                        style:width=format!("{}%", file.progress)
                    ></div>
                </div>
                <p class="text-xs text-gray-500 dark:text-gray-400 mt-1 text-center">
                    {format!("{}%", file.progress.round())}
                </p>
            </div>
        }
        .into_view(),
        UploadStatus::Completed => view! {
            <svg
                class="w-6 h-6 text-green-500"
                aria-label=move || settings.t("upload.completed")
                xmlns="http://www.w3.org/2000/svg"
                fill="none"
                viewBox="0 0 24 24"
            >
                <path
                    stroke="currentColor"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                    stroke-width="2"
                    d="M22 11.08V12a10 10 0 1 1-5.93-9.14M22 4 12 14.01l-3-3"
                />
            </svg>
        }
        .into_view(),
        UploadStatus::Error => view! {
            <div class="flex items-center space-x-2">
                <svg
                    class="w-6 h-6 text-red-500"
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
                        d="M12 22a10 10 0 1 0 0-20 10 10 0 0 0 0 20Zm3-13-6 6m0-6 6 6"
                    />
                </svg>
                <span class="text-xs text-red-500">{move || settings.t("upload.error")}</span>
            </div>
        }
        .into_view(),
    };
    let id = file.id.clone();

    view! {
        <div class="flex items-center p-4 bg-gray-50 dark:bg-gray-700/50 rounded-lg">
            <div class="flex items-center flex-1 min-w-0 space-x-4">
                {thumbnail}
                <div class="flex-1 min-w-0">
                    <p class="text-sm font-medium text-gray-900 dark:text-white truncate">
                        {file.name.clone()}
                    </p>
                    <p class="text-xs text-gray-500 dark:text-gray-400">
                        {format_file_size(file.size)}
                    </p>
                </div>
            </div>
            <div class="flex items-center space-x-4">
                {status}
                <button
                    type="button"
                    class="p-2 hover:bg-gray-200 dark:hover:bg-gray-600 rounded-lg transition-colors duration-200 text-gray-500 dark:text-gray-400"
                    aria-label=move || settings.t("upload.remove")
                    on:click=move |_| on_remove(id.clone())
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
                            d="M18 6 6 18M6 6l12 12"
                        />
                    </svg>
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1000), "1000 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
        assert_eq!(format_file_size(5 * 1024u64.pow(4)), "5120 GB");
    }
}
