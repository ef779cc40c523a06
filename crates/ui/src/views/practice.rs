#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use dioxus::prelude::*;
use services::TableSource;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{FieldVm, SentenceCardVm, StatsVm, TableInfoVm};

#[derive(Clone, Debug, PartialEq)]
struct PracticeData {
    info: TableInfoVm,
    card: Option<SentenceCardVm>,
    stats: StatsVm,
}

#[component]
pub fn PracticeView() -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.practice_service();
    let default_source = ctx.default_source();
    let session = ctx.session_id();

    let upload = use_signal(|| None::<TableSource>);
    let upload_error = use_signal(|| None::<String>);
    let action_error = use_signal(|| None::<ViewError>);
    let revision = use_signal(|| 0_u32);

    let resource = {
        let service = service.clone();
        let default_source = default_source.clone();
        use_resource(move || {
            let service = service.clone();
            let source = upload().unwrap_or_else(|| default_source.clone());
            // Re-read after every draw.
            let _ = revision();

            async move {
                let loaded = service.load_table(&source)?;
                let info = TableInfoVm::new(&service.table_info(&loaded), &loaded);
                let card = service
                    .current(session, &loaded)
                    .await?
                    .as_ref()
                    .map(SentenceCardVm::from);
                let stats = StatsVm::from(&service.stats(session, &loaded).await?);
                Ok::<_, ViewError>(PracticeData { info, card, stats })
            }
        })
    };

    let draw = move |_: MouseEvent| {
        let service = service.clone();
        let source = (*upload.peek()).clone().unwrap_or_else(|| default_source.clone());
        let mut action_error = action_error;
        let mut revision = revision;
        spawn(async move {
            let drawn = match service.load_table(&source) {
                Ok(loaded) => service.draw(session, &loaded).await,
                Err(err) => Err(err),
            };
            match drawn {
                Ok(_) => {
                    action_error.set(None);
                    *revision.write() += 1;
                }
                Err(err) => action_error.set(Some(ViewError::from(err))),
            }
        });
    };

    let accept_upload = use_callback(move |outcome: Result<TableSource, String>| {
        let mut upload = upload;
        let mut upload_error = upload_error;
        match outcome {
            Ok(source) => {
                upload_error.set(None);
                upload.set(Some(source));
            }
            Err(message) => upload_error.set(Some(message)),
        }
    });

    #[cfg(test)]
    {
        if let Some(handles) = try_consume_context::<PracticeTestHandles>() {
            handles.register(accept_upload);
        }
    }

    let on_upload = move |evt: FormEvent| {
        spawn(async move {
            let Some(file) = evt.files().into_iter().next() else {
                return;
            };
            let name = file.name();
            let bytes = file
                .read_bytes()
                .await
                .map(|bytes| bytes.to_vec())
                .map_err(|err| err.to_string());
            accept_upload.call(upload_outcome(name, bytes));
        });
    };

    let state = view_state_from_resource(resource);
    let uploaded = upload.read().is_some();

    rsx! {
        div { class: "page practice",
            h1 { "Chinese Practice Homework" }
            p { class: "instructions",
                "Click the button below to get a random sentence from your practice file!"
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if uploaded {
                        p { class: "notice notice--success", "File uploaded successfully!" }
                    }
                    TableInfoPanel { info: data.info.clone() }
                    if data.info.has_rows() {
                        div { class: "draw",
                            button {
                                id: "draw-sentence",
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: draw,
                                "Get Random Sentence"
                            }
                        }
                    } else {
                        p { class: "notice notice--info", "No sentences found in this file." }
                    }
                    if let Some(err) = action_error.read().as_ref() {
                        p { class: "notice notice--error", "{err.message()}" }
                    }
                    if let Some(card) = data.card.clone() {
                        SentenceCard { card }
                    }
                    StatsPanel { stats: data.stats.clone() }
                },
                ViewState::Error(err) => rsx! {
                    LoadErrorBox { error: err.clone(), on_upload }
                    if let Some(message) = upload_error.read().as_ref() {
                        p { class: "notice notice--error", "{message}" }
                    }
                    p { class: "notice notice--warning",
                        "No data loaded. Please check the file path or upload a file."
                    }
                },
            }
        }
    }
}

/// Turn a picked file into the source to load, or the message to show.
pub(crate) fn upload_outcome(
    name: String,
    bytes: Result<Vec<u8>, String>,
) -> Result<TableSource, String> {
    match bytes {
        Ok(bytes) if bytes.is_empty() => Err(format!("Error reading uploaded file: {name} is empty")),
        Ok(bytes) => Ok(TableSource::upload(name, bytes)),
        Err(err) => Err(format!("Error reading uploaded file: {err}")),
    }
}

#[component]
fn LoadErrorBox(error: ViewError, on_upload: EventHandler<FormEvent>) -> Element {
    rsx! {
        div { class: "load-error",
            p { class: "notice notice--error", "{error.message()}" }
            if let Some(hint) = error.hint() {
                p { class: "notice notice--info", "{hint}" }
            }
            if error.offers_upload() {
                hr {}
                h3 { "Or upload your file here:" }
                label { r#for: "upload-file", "Choose an Excel file" }
                input {
                    id: "upload-file",
                    r#type: "file",
                    accept: ".xlsx,.xls",
                    onchange: move |evt| on_upload.call(evt),
                }
            }
        }
    }
}

#[component]
fn TableInfoPanel(info: TableInfoVm) -> Element {
    rsx! {
        details { class: "panel file-info",
            summary { "File Information" }
            p { "Source: {info.source}" }
            p { "Total rows: {info.total_rows}" }
            p { "Columns: {info.columns}" }
            if let Some(modified) = info.modified_str.as_ref() {
                p { "Last modified: {modified}" }
            }
        }
    }
}

#[component]
fn SentenceCard(card: SentenceCardVm) -> Element {
    rsx! {
        section { class: "sentence",
            hr {}
            h2 { "Your Random Sentence:" }
            for field in card.fields.iter() {
                FieldRow { field: field.clone() }
            }
            p { class: "caption", "{card.position}" }
            details { class: "panel raw-data",
                summary { "View Raw Data" }
                pre { "{card.raw_json}" }
            }
        }
    }
}

#[component]
fn FieldRow(field: FieldVm) -> Element {
    rsx! {
        div { class: "field",
            span { class: "field-label", "{field.label}:" }
            p { class: "{field.value_class}", "{field.value}" }
        }
    }
}

#[component]
fn StatsPanel(stats: StatsVm) -> Element {
    let width = stats.progress_width();
    rsx! {
        hr {}
        details { class: "panel stats",
            summary { "Practice Statistics" }
            div { class: "metrics",
                div { class: "metric",
                    span { class: "metric-label", "Total Practices" }
                    span { class: "metric-value", "{stats.practice_count}" }
                }
                div { class: "metric",
                    span { class: "metric-label", "Coverage" }
                    span { class: "metric-value", "{stats.coverage_str}" }
                }
            }
            div { class: "progress",
                div { class: "progress-fill", style: "width: {width};" }
            }
            p { class: "caption", "{stats.caption}" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct PracticeTestHandles {
    accept_upload: Rc<RefCell<Option<Callback<Result<TableSource, String>>>>>,
}

#[cfg(test)]
impl PracticeTestHandles {
    pub(crate) fn register(&self, accept_upload: Callback<Result<TableSource, String>>) {
        *self.accept_upload.borrow_mut() = Some(accept_upload);
    }

    pub(crate) fn accept_upload(&self) -> Callback<Result<TableSource, String>> {
        (*self.accept_upload.borrow()).expect("upload callback registered")
    }
}
