pub mod comments;
pub mod content;
pub mod email_list;
pub mod events;
pub mod groups;
pub mod likes;
pub mod programs;
pub mod tags;
pub mod tasks;
pub mod troops;
pub mod users;
pub mod workspaces;

pub use comments::CommentRepository;
pub use content::ContentRepository;
pub use email_list::EmailListRepository;
pub use events::EventRepository;
pub use groups::GroupRepository;
pub use likes::LikeRepository;
pub use programs::ProgramRepository;
pub use tags::TagRepository;
pub use tasks::TaskRepository;
pub use troops::TroopRepository;
pub use users::UserRepository;
pub use workspaces::WorkspaceRepository;
