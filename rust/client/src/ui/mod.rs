use super::{error::GridWorldError, mdps::Policy, GridWorldConfig};
use display::*;
use iced::executor;
use iced::theme::{self, Theme};
use iced::time;
use iced::widget::{button, column, container, row, slider, text};
use iced::{Alignment, Application, Command, Element, Length, Settings, Subscription};
use std::time::Duration;

pub struct GridWorldApp {
    display: Display,
    is_playing: bool,
    queued_ticks: usize,
    speed: usize,
    next_speed: Option<usize>,
    version: usize,
}

#[derive(Debug, Clone)]
pub enum Message {
    Display(display::Message, usize),
    Tick,
    TogglePlayback,
    Next,
    SpeedChanged(f32),
    Reset,
}

impl Application for GridWorldApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = executor::Default;
    type Flags = EnvironmentProxyFlags;

    fn new(flags: EnvironmentProxyFlags) -> (Self, Command<Message>) {
        (
            Self {
                display: Display::new(flags),
                is_playing: Default::default(),
                queued_ticks: Default::default(),
                speed: 4,
                next_speed: Default::default(),
                version: Default::default(),
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        format!("Grid World - {0}x{0}", self.display.size())
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::Display(message, version) => {
                if version == self.version {
                    self.display.update(message);
                }
            }
            Message::Tick | Message::Next => {
                self.queued_ticks = (self.queued_ticks + 1).min(self.speed);

                if let Some(task) = self.display.tick(self.queued_ticks) {
                    if let Some(speed) = self.next_speed.take() {
                        self.speed = speed;
                    }

                    self.queued_ticks = 0;

                    let version = self.version;

                    return Command::perform(task, move |message| {
                        Message::Display(message, version)
                    });
                }
            }
            Message::TogglePlayback => {
                self.is_playing = !self.is_playing;
            }
            Message::SpeedChanged(speed) => {
                if self.is_playing {
                    self.next_speed = Some(speed.round() as usize);
                } else {
                    self.speed = speed.round() as usize;
                }
            }
            Message::Reset => {
                self.display.reset();
                self.version += 1;
            }
        }

        Command::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.is_playing {
            time::every(Duration::from_millis(1000 / self.speed as u64)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn view(&self) -> Element<Message> {
        let version = self.version;
        let selected_speed = self.next_speed.unwrap_or(self.speed);
        let controls = Self::view_controls(self.is_playing, selected_speed);

        let content = column![
            self.display
                .view()
                .map(move |message| Message::Display(message, version)),
            controls,
        ]
        .height(Length::Fill);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

impl GridWorldApp {
    /// Opens the viewer and blocks until it is closed. The environment is
    /// always built in `rgb_array` mode, whatever `config` asks for.
    pub fn run(
        config: &GridWorldConfig,
        reset_seed: Option<u64>,
        policy: Box<dyn Policy>,
    ) -> Result<(), GridWorldError> {
        let config = GridWorldConfig {
            render_mode: Some(super::RenderMode::RgbArray.to_string()),
            ..config.clone()
        };
        let env = super::GridWorldEnv::from_config(&config)?;

        <Self as Application>::run(Settings {
            antialiasing: true,
            window: iced::window::Settings {
                position: iced::window::Position::Centered,
                size: iced::Size {
                    height: 620.,
                    width: 560.,
                },
                ..iced::window::Settings::default()
            },
            ..Settings::with_flags(EnvironmentProxyFlags {
                env,
                reset_seed,
                policy,
            })
        })
        .map_err(|e| GridWorldError::Render(e.to_string()))
    }

    fn view_controls<'a>(is_playing: bool, speed: usize) -> Element<'a, Message> {
        let playback_controls = row![
            button(if is_playing { "Pause" } else { "Play" }).on_press(Message::TogglePlayback),
            button("Next")
                .on_press_maybe((!is_playing).then_some(Message::Next))
                .style(theme::Button::Secondary),
        ]
        .spacing(10);

        let speed_controls = row![
            slider(1.0..=20.0, speed as f32, Message::SpeedChanged),
            text(format!("x{speed}")).size(16),
        ]
        .align_items(Alignment::Center)
        .spacing(10);

        row![
            playback_controls,
            speed_controls,
            button("Reset")
                .on_press_maybe((!is_playing).then_some(Message::Reset))
                .style(theme::Button::Destructive)
        ]
        .padding(10)
        .spacing(20)
        .align_items(Alignment::Center)
        .into()
    }
}

pub mod display {
    use super::super::{mdps::Policy, Discrete, Env, GridWorldEnv};
    use iced::widget::{column, text};
    use iced::{Element, Length};
    use std::future::Future;
    use std::time::{Duration, Instant};
    use tracing::{debug, warn};

    pub struct Display {
        state: State,
        last_tick_duration: Duration,
        last_queued_ticks: usize,
    }

    #[derive(Debug, Clone)]
    pub enum Message {
        Ticked {
            result: Result<(), TickError>,
            tick_duration: Duration,
        },
    }

    #[derive(Debug, Clone)]
    pub enum TickError {
        JoinFailed,
    }

    impl Display {
        pub fn new(flags: EnvironmentProxyFlags) -> Self {
            let env = EnvironmentProxy::new(flags);

            Self {
                state: State::with_env(env),
                last_tick_duration: Duration::default(),
                last_queued_ticks: 0,
            }
        }

        pub fn tick(&mut self, amount: usize) -> Option<impl Future<Output = Message>> {
            let tick = self.state.tick(amount)?;

            self.last_queued_ticks = amount;

            Some(async move {
                let start = Instant::now();
                let result = tick.await;
                let tick_duration = start.elapsed() / amount.max(1) as u32;

                Message::Ticked {
                    result,
                    tick_duration,
                }
            })
        }

        pub fn reset(&mut self) {
            self.state.reset();
        }

        pub fn size(&self) -> usize {
            self.state.env.size()
        }

        pub fn update(&mut self, message: Message) {
            match message {
                Message::Ticked {
                    result: Ok(()),
                    tick_duration,
                } => {
                    self.state.update();

                    self.last_tick_duration = tick_duration;
                    debug!(
                        ticks = self.last_queued_ticks,
                        ?tick_duration,
                        "ticked"
                    );
                }
                Message::Ticked {
                    result: Err(error), ..
                } => {
                    warn!(?error, "tick failed");
                }
            }
        }

        pub fn view(&self) -> Element<Message> {
            let env = &self.state.env;
            let handle = iced::widget::image::Handle::from_pixels(
                env.frame_size as u32,
                env.frame_size as u32,
                env.frame_rgba.clone(),
            );
            let image = iced::widget::Image::new(handle)
                .width(Length::Fill)
                .height(Length::Fill);

            let status = text(format!(
                "episode {}  step {}  return {}",
                env.episode, env.steps, env.episode_return
            ))
            .size(16);

            iced::widget::container(column![image, status].spacing(5))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x()
                .center_y()
                .into()
        }
    }

    struct State {
        env: EnvironmentProxy,
        is_ticking: bool,
    }

    impl State {
        pub fn with_env(env: EnvironmentProxy) -> Self {
            Self {
                env,
                is_ticking: Default::default(),
            }
        }

        pub fn reset(&mut self) {
            self.env.reset();
            self.is_ticking = false;
        }

        fn update(&mut self) {
            self.is_ticking = false;
        }

        fn tick(&mut self, amount: usize) -> Option<impl Future<Output = Result<(), TickError>>> {
            if self.is_ticking {
                return None;
            }

            self.is_ticking = true;

            for _ in 0..amount {
                self.env.tick();
            }
            self.env.refresh_frame();

            Some(async move {
                tokio::task::spawn_blocking(move || ())
                    .await
                    .map_err(|_| TickError::JoinFailed)
            })
        }
    }

    pub struct EnvironmentProxyFlags {
        pub env: GridWorldEnv,
        pub reset_seed: Option<u64>,
        pub policy: Box<dyn Policy>,
    }

    /// Owns the environment and keeps the last frame as RGBA for the view.
    pub struct EnvironmentProxy {
        env: GridWorldEnv,
        reset_seed: Option<u64>,
        last_known_state: Discrete,
        policy: Box<dyn Policy>,
        episode: usize,
        steps: usize,
        episode_return: f64,
        frame_size: usize,
        frame_rgba: Vec<u8>,
        /// The last tick ended the episode; the next one resets.
        episode_over: bool,
    }

    impl EnvironmentProxy {
        pub fn new(flags: EnvironmentProxyFlags) -> Self {
            let mut env = flags.env;
            let (last_known_state, _) = env.reset(flags.reset_seed);

            let mut proxy = Self {
                env,
                reset_seed: flags.reset_seed,
                last_known_state,
                policy: flags.policy,
                episode: 1,
                steps: 0,
                episode_return: 0.,
                frame_size: 0,
                frame_rgba: Vec::new(),
                episode_over: false,
            };
            proxy.refresh_frame();

            proxy
        }

        pub fn size(&self) -> usize {
            self.env.size()
        }

        /// One step of the policy. The tick after a finished episode starts a
        /// new one instead of stepping, so the final frame stays visible.
        pub fn tick(&mut self) {
            if self.episode_over {
                self.start_episode(None);
                return;
            }

            let action = self.policy.policy(self.last_known_state);
            let si = self.env.step(action);
            self.steps += 1;
            self.episode_return += si.reward;
            self.last_known_state = si.observation;

            if si.terminated || si.truncated {
                debug!(
                    episode = self.episode,
                    steps = self.steps,
                    episode_return = self.episode_return,
                    "episode finished"
                );
                self.episode_over = true;
            }
        }

        pub fn reset(&mut self) {
            self.episode = 0;
            self.start_episode(self.reset_seed);
            self.refresh_frame();
        }

        fn start_episode(&mut self, seed: Option<u64>) {
            let (s, _) = self.env.reset(seed);
            self.last_known_state = s;
            self.episode += 1;
            self.steps = 0;
            self.episode_return = 0.;
            self.episode_over = false;
        }

        pub fn refresh_frame(&mut self) {
            let frame = match self.env.render() {
                Ok(Some(frame)) => frame,
                Ok(None) => return,
                Err(e) => {
                    warn!(error = %e, "failed to render frame");
                    return;
                }
            };

            if let Some(pixels) = frame.as_rgb() {
                self.frame_size = pixels.shape()[0];
                self.frame_rgba = pixels
                    .outer_iter()
                    .flat_map(|row| {
                        row.outer_iter()
                            .flat_map(|px| [px[0], px[1], px[2], 255])
                            .collect::<Vec<_>>()
                    })
                    .collect();
            }
        }
    }

}
