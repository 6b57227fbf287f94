//! Dataset upload control.
//!
//! A toolbar button backed by a hidden file input. The selected CSV is
//! posted as multipart form data; the backend answers with an ingest job
//! id which is then polled until the job completes or fails. On success
//! the parent is notified through `on_dataset_loaded` so it can refresh
//! the dataset status and the picker catalogs.

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use web_sys::{File, FormData, HtmlInputElement};
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::jobs::JobStatus;

use crate::components::chat::helpers::show_toast;

#[derive(Properties, PartialEq, Clone)]
pub struct DatasetUploadProps {
    /// Fired with the ingest completion message once the dataset is live.
    pub on_dataset_loaded: Callback<String>,
}

pub enum Msg {
    OpenFilePicker,
    FileSelected(File),
    JobQueued(String),
    PollTick,
    StatusPolled(JobStatus),
    UploadFailed(String),
}

pub struct DatasetUploadComponent {
    file_input_ref: NodeRef,
    job_id: Option<String>,
    uploading: bool,
    rows_done: Option<u32>,
}

impl Component for DatasetUploadComponent {
    type Message = Msg;
    type Properties = DatasetUploadProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            file_input_ref: NodeRef::default(),
            job_id: None,
            uploading: false,
            rows_done: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::OpenFilePicker => {
                if let Some(input) = self.file_input_ref.cast::<HtmlInputElement>() {
                    input.click();
                }
                false
            }
            Msg::FileSelected(file) => {
                self.uploading = true;
                self.rows_done = None;
                post_file(ctx.link().clone(), file);
                true
            }
            Msg::JobQueued(job_id) => {
                self.job_id = Some(job_id);
                schedule_poll(ctx.link().clone());
                false
            }
            Msg::PollTick => {
                if let Some(job_id) = self.job_id.clone() {
                    poll_job(ctx.link().clone(), job_id);
                }
                false
            }
            Msg::StatusPolled(status) => match status {
                JobStatus::Pending => {
                    schedule_poll(ctx.link().clone());
                    false
                }
                JobStatus::InProgress(rows) => {
                    self.rows_done = Some(rows);
                    schedule_poll(ctx.link().clone());
                    true
                }
                JobStatus::Completed(message) => {
                    self.uploading = false;
                    self.job_id = None;
                    self.rows_done = None;
                    ctx.props().on_dataset_loaded.emit(message);
                    true
                }
                JobStatus::Failed(error) => {
                    self.uploading = false;
                    self.job_id = None;
                    self.rows_done = None;
                    show_toast(&format!("Upload failed: {}", error));
                    true
                }
            },
            Msg::UploadFailed(error) => {
                self.uploading = false;
                self.job_id = None;
                self.rows_done = None;
                show_toast(&format!("Upload failed: {}", error));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let label = match (self.uploading, self.rows_done) {
            (false, _) => "Upload CSV".to_string(),
            (true, None) => "Uploading...".to_string(),
            (true, Some(rows)) => format!("Loading ({} rows)...", rows),
        };

        html! {
            <>
                <input
                    type="file"
                    accept=".csv"
                    ref={self.file_input_ref.clone()}
                    style="display:none;"
                    onchange={link.batch_callback(|e: Event| {
                        let input = e.target_unchecked_into::<HtmlInputElement>();
                        let file = input.files().and_then(|files| files.get(0));
                        // Allow re-selecting the same file later.
                        input.set_value("");
                        file.map(Msg::FileSelected).into_iter().collect::<Vec<_>>()
                    })}
                />
                <button
                    disabled={self.uploading}
                    style="padding:6px 14px;border:1px solid #1565c0;border-radius:6px;background:#fff;color:#1565c0;cursor:pointer;"
                    onclick={link.callback(|_| Msg::OpenFilePicker)}
                >
                    { label }
                </button>
            </>
        }
    }
}

/// Posts the file as multipart form data and reports the job id back.
fn post_file(link: Scope<DatasetUploadComponent>, file: File) {
    spawn_local(async move {
        let form = match FormData::new() {
            Ok(form) => form,
            Err(_) => {
                link.send_message(Msg::UploadFailed("could not build form data".to_string()));
                return;
            }
        };
        if form
            .append_with_blob_and_filename("file", &file, &file.name())
            .is_err()
        {
            link.send_message(Msg::UploadFailed("could not attach file".to_string()));
            return;
        }

        let request = match Request::post("/api/dataset/upload").body(form) {
            Ok(request) => request,
            Err(err) => {
                link.send_message(Msg::UploadFailed(err.to_string()));
                return;
            }
        };
        match request.send().await {
            Ok(response) if response.status() == 200 => {
                let job_id = response.text().await.unwrap_or_default();
                if job_id.is_empty() {
                    link.send_message(Msg::UploadFailed("empty job id".to_string()));
                } else {
                    link.send_message(Msg::JobQueued(job_id));
                }
            }
            Ok(response) => {
                let body = response.text().await.unwrap_or_default();
                link.send_message(Msg::UploadFailed(body));
            }
            Err(err) => link.send_message(Msg::UploadFailed(err.to_string())),
        }
    });
}

fn schedule_poll(link: Scope<DatasetUploadComponent>) {
    spawn_local(async move {
        TimeoutFuture::new(400).await;
        link.send_message(Msg::PollTick);
    });
}

fn poll_job(link: Scope<DatasetUploadComponent>, job_id: String) {
    spawn_local(async move {
        // Cache-busting timestamp so intermediaries never replay a stale
        // job status.
        let url = format!(
            "/api/dataset/jobs/{}?t={}",
            job_id,
            js_sys::Date::now() as u64
        );
        match Request::get(&url).send().await {
            Ok(response) if response.status() == 200 => {
                match response.json::<JobStatus>().await {
                    Ok(status) => link.send_message(Msg::StatusPolled(status)),
                    Err(err) => link.send_message(Msg::UploadFailed(err.to_string())),
                }
            }
            Ok(response) => {
                let body = response.text().await.unwrap_or_default();
                link.send_message(Msg::UploadFailed(body));
            }
            Err(err) => link.send_message(Msg::UploadFailed(err.to_string())),
        }
    });
}
