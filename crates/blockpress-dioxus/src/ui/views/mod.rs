mod author_posts;
mod drafts;
mod editor;
mod home;
mod login;
mod post_view;

pub use author_posts::AuthorPosts;
pub use drafts::Drafts;
pub use editor::EditorView;
pub use home::Home;
pub use login::Login;
pub use post_view::PostView;
