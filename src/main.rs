use iced::futures::channel::mpsc;
use iced::futures::{SinkExt, Stream, StreamExt};
use iced::widget::{
    button, column, container, progress_bar, row, scrollable, text, text_input, Column,
};
use iced::{window, Alignment, Color, Element, Length, Size, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod pipeline;
mod state;

use pipeline::runner::{self, RunParams};
use pipeline::scanner;
use state::session::{BatchSummary, ProgressUpdate};
use state::settings::Settings;

/// Lifecycle of the pipeline as the form sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Validating,
    Running,
    Completed,
    Failed,
}

/// Events delivered from the worker back to the form.
#[derive(Debug, Clone)]
enum RunEvent {
    Progress(ProgressUpdate),
    Finished(BatchSummary),
    Failed(String),
}

/// Main application state
struct ResizerForm {
    input_folder: String,
    output_folder: String,
    new_width: String,
    /// Entry names of the picked input folder, shown for confirmation
    input_entries: Vec<String>,
    run_state: RunState,
    /// Progress bar value, 0..=100
    progress: f32,
    /// Status line shown under the progress bar
    status: String,
    /// Show the completion glyph after a run that processed files
    show_done: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    InputFolderChanged(String),
    OutputFolderChanged(String),
    WidthChanged(String),
    /// Pick the input folder and list its entries
    BrowseInputFolder,
    /// Pick the output folder
    BrowseOutputFolder,
    /// User clicked "Start resizing"
    StartPressed,
    /// Something happened on the worker
    Run(RunEvent),
}

impl ResizerForm {
    /// Create the form, repopulating the fields from the settings file.
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load(&Settings::default_path());

        (
            ResizerForm {
                input_folder: settings.input_folder,
                output_folder: settings.output_folder,
                new_width: settings.new_width,
                input_entries: Vec::new(),
                run_state: RunState::Idle,
                progress: 0.0,
                status: String::new(),
                show_done: false,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputFolderChanged(value) => {
                self.input_folder = value;
                Task::none()
            }
            Message::OutputFolderChanged(value) => {
                self.output_folder = value;
                Task::none()
            }
            Message::WidthChanged(value) => {
                self.new_width = value;
                Task::none()
            }
            Message::BrowseInputFolder => {
                let folder = FileDialog::new()
                    .set_title("Select the folder with images to resize")
                    .pick_folder();

                if let Some(path) = folder {
                    self.input_folder = path.display().to_string();
                    match scanner::list_entries(&path) {
                        Ok(entries) => self.input_entries = entries,
                        Err(e) => self.status = format!("Could not list folder: {e}"),
                    }
                }

                Task::none()
            }
            Message::BrowseOutputFolder => {
                let folder = FileDialog::new()
                    .set_title("Select the output folder")
                    .pick_folder();

                if let Some(path) = folder {
                    self.output_folder = path.display().to_string();
                }

                Task::none()
            }
            Message::StartPressed => {
                self.run_state = RunState::Validating;
                self.show_done = false;
                self.progress = 0.0;

                let submitted = Settings {
                    input_folder: self.input_folder.clone(),
                    output_folder: self.output_folder.clone(),
                    new_width: self.new_width.clone(),
                };

                match runner::validate(&submitted) {
                    Ok(params) => {
                        self.run_state = RunState::Running;
                        self.status = "Processing...".to_string();
                        Task::run(run_stream(params, Settings::default_path()), Message::Run)
                    }
                    Err(e) => {
                        self.run_state = RunState::Failed;
                        self.status = e.to_string();
                        Task::none()
                    }
                }
            }
            Message::Run(RunEvent::Progress(update)) => {
                self.progress = update.percent();
                self.status = update.status;
                Task::none()
            }
            Message::Run(RunEvent::Finished(summary)) => {
                self.run_state = RunState::Completed;
                if summary.total > 0 {
                    self.progress = 100.0;
                    self.status = format!("Resizing complete: {} images.", summary.processed);
                    self.show_done = true;
                }
                Task::none()
            }
            Message::Run(RunEvent::Failed(reason)) => {
                self.run_state = RunState::Failed;
                self.status = reason;
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let input_row = row![
            button("Input folder...")
                .on_press(Message::BrowseInputFolder)
                .padding(10),
            text_input("Folder with images to resize", &self.input_folder)
                .on_input(Message::InputFolderChanged)
                .padding(8),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let output_row = row![
            button("Output folder...")
                .on_press(Message::BrowseOutputFolder)
                .padding(10),
            text_input("Folder for resized images", &self.output_folder)
                .on_input(Message::OutputFolderChanged)
                .padding(8),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let width_row = row![
            text("Target width:").size(16),
            text_input("e.g. 1920", &self.new_width)
                .on_input(Message::WidthChanged)
                .padding(8)
                .width(Length::Fixed(140.0)),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let done_glyph = if self.show_done {
            text("✔").size(36).color(Color::from_rgb(0.3, 0.8, 0.3))
        } else {
            text(" ").size(36)
        };

        let progress_row = row![
            progress_bar(0.0..=100.0, self.progress).width(Length::Fixed(420.0)),
            done_glyph,
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        // Only one run at a time: Start stays disabled while Running
        let start = button("Start resizing")
            .on_press_maybe((self.run_state != RunState::Running).then_some(Message::StartPressed))
            .padding(10);

        let entries = scrollable(
            self.input_entries
                .iter()
                .fold(Column::new().spacing(2), |col, name| {
                    col.push(text(name).size(14))
                }),
        )
        .height(Length::Fixed(140.0))
        .width(Length::Fill);

        let content: Column<Message> = column![
            text("Image Resizer").size(28),
            input_row,
            output_row,
            width_row,
            progress_row,
            text(&self.status).size(16),
            start,
            text("Files and folders").size(14),
            entries,
            text(concat!("image-resizer v", env!("CARGO_PKG_VERSION")))
                .size(11)
                .color(Color::from_rgb(0.5, 0.5, 0.5)),
        ]
        .spacing(14)
        .padding(20)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("Image Resizer", ResizerForm::update, ResizerForm::view)
        .theme(ResizerForm::theme)
        .window(window::Settings {
            size: Size::new(620.0, 640.0),
            resizable: false,
            ..window::Settings::default()
        })
        .centered()
        .run_with(ResizerForm::new)
}

/// Run the pipeline on a blocking worker and surface its progress as a
/// stream of events for the presentation thread.
///
/// The worker only ever sends owned snapshots over the channel; widget
/// state stays on this side.
fn run_stream(params: RunParams, settings_path: PathBuf) -> impl Stream<Item = RunEvent> {
    iced::stream::channel(16, |mut output| async move {
        let (tx, mut rx) = mpsc::unbounded();

        let worker = tokio::task::spawn_blocking(move || {
            runner::execute_run(&params, &settings_path, |update| {
                let _ = tx.unbounded_send(update);
            })
        });

        // tx drops when the worker returns, which ends this loop
        while let Some(update) = rx.next().await {
            let _ = output.send(RunEvent::Progress(update)).await;
        }

        let event = match worker.await {
            Ok(Ok(summary)) => RunEvent::Finished(summary),
            Ok(Err(e)) => RunEvent::Failed(e.to_string()),
            Err(e) => RunEvent::Failed(format!("worker failed: {e}")),
        };
        let _ = output.send(event).await;
    })
}
