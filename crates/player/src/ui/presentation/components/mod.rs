pub mod admin_view;
pub mod board;
pub mod loading;
pub mod login;
pub mod user_view;

pub use admin_view::AdminView;
pub use board::Board;
pub use loading::Loading;
pub use login::LoginView;
pub use user_view::UserView;
