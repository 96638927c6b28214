//! Maps tracked facial landmarks onto a stylized emoji face.

pub mod drawing {
    pub mod domain {
        pub mod draw_command;
        pub mod drawing_surface;
    }
    pub mod infrastructure;
}

pub mod emoji {
    pub mod domain {
        pub mod debug_toggle;
        pub mod face_metrics;
        pub mod geometry;
    }
}

pub mod pipeline {
    pub mod emojify_session;
    pub mod face_to_emoji_renderer;
}

pub mod shared {
    pub mod color;
    pub mod constants;
    pub mod point;
}

pub mod tracking {
    pub mod domain {
        pub mod face_tracker;
        pub mod landmark_set;
        pub mod tracking_sample;
    }
    pub mod infrastructure;
}
