mod button;
mod slider;
mod textarea;

pub use button::Button;
pub use slider::Slider;
pub use textarea::Textarea;
