mod app;
mod emoji_canvas;

use app::App;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title("Emojify")
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(720.0, 620.0),
            ..Default::default()
        })
        .run()
}
