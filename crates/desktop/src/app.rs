use std::path::PathBuf;
use std::time::Duration;

use iced::widget::{button, canvas, column, container, row, text, Space};
use iced::{keyboard, Color, Element, Event, Length, Subscription, Task};

use emojify_core::drawing::infrastructure::display_list::DisplayList;
use emojify_core::pipeline::emojify_session::{report_stream_error, EmojifySession, StreamError};
use emojify_core::pipeline::face_to_emoji_renderer::FaceToEmojiRenderer;
use emojify_core::tracking::infrastructure::replay_tracker::{ReplayTracker, TrackingRecording};

use crate::emoji_canvas::EmojiCanvas;

/// Roughly 30 frames per second.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
const BACKDROP: Color = Color::from_rgb(0.12, 0.12, 0.14);

type Session = EmojifySession<ReplayTracker, DisplayList>;

#[derive(Debug, Clone)]
pub enum Message {
    OpenRecording,
    RecordingSelected(Option<PathBuf>),
    Start,
    Stop,
    Tick,
    KeyPressed(String),
}

pub struct App {
    session: Option<Session>,
    recording_path: Option<PathBuf>,
    error: Option<&'static str>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        (
            Self {
                session: None,
                recording_path: None,
                error: None,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenRecording => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Open tracking recording")
                            .add_filter("Tracking recording", &["json"])
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::RecordingSelected,
                );
            }
            Message::RecordingSelected(Some(path)) => self.open_recording(path),
            Message::RecordingSelected(None) => {}
            Message::Start => {
                if let Some(session) = &mut self.session {
                    session.start_tracking();
                }
            }
            Message::Stop => {
                if let Some(session) = &mut self.session {
                    session.stop_tracking();
                }
            }
            Message::Tick => {
                if let Some(session) = &mut self.session {
                    session.renderer_mut().draw_frame();
                }
            }
            Message::KeyPressed(key) => {
                if let Some(session) = &mut self.session {
                    session.renderer_mut().key_pressed(&key);
                }
            }
        }
        Task::none()
    }

    fn open_recording(&mut self, path: PathBuf) {
        // Replacing the session drops the old tracker and surface.
        self.session = None;
        match TrackingRecording::load(&path) {
            Ok(recording) => {
                let (width, height) = (recording.width, recording.height);
                let tracker = ReplayTracker::new(recording).with_looping(true);
                let renderer = FaceToEmojiRenderer::new(tracker, DisplayList::new());
                let mut session = EmojifySession::new(renderer);
                session.on_stream_ready(width, height);
                self.session = Some(session);
                self.error = None;
            }
            Err(e) => {
                log::error!("Failed to open {}: {e}", path.display());
                self.error = Some(report_stream_error(&StreamError::from(&e)));
            }
        }
        self.recording_path = Some(path);
    }

    pub fn view(&self) -> Element<'_, Message> {
        let has_session = self.session.is_some();
        let controls = row![
            button(text("Open recording\u{2026}")).on_press(Message::OpenRecording),
            button(text("Start")).on_press_maybe(has_session.then_some(Message::Start)),
            button(text("Stop")).on_press_maybe(has_session.then_some(Message::Stop)),
            Space::new().width(Length::Fill),
            text("Press F to toggle debug").size(12),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center);

        let source = self
            .recording_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "No recording loaded".to_string());

        let stage: Element<'_, Message> = match (&self.session, self.error) {
            (_, Some(message)) => text(message).color(Color::from_rgb(1.0, 0.4, 0.35)).into(),
            (Some(session), None) => {
                let list = session.renderer().surface();
                let (w, h) = list.size();
                canvas(EmojiCanvas::new(list.commands()))
                    .width(Length::Fixed(w as f32))
                    .height(Length::Fixed(h as f32))
                    .into()
            }
            (None, None) => text("Open a recording to begin").into(),
        };

        let stage = container(stage)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_| container::Style {
                background: Some(BACKDROP.into()),
                ..container::Style::default()
            });

        column![controls, text(source).size(11), stage]
            .spacing(10)
            .padding(16)
            .height(Length::Fill)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let keys = iced::event::listen_with(|event, _status, _window| match event {
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Character(c),
                ..
            }) => Some(Message::KeyPressed(c.to_string())),
            _ => None,
        });

        let running = self
            .session
            .as_ref()
            .is_some_and(|s| s.renderer().is_started());
        if running {
            Subscription::batch([keys, iced::time::every(FRAME_INTERVAL).map(|_| Message::Tick)])
        } else {
            keys
        }
    }
}
