pub mod content;
pub mod episode;
pub mod notification;
pub mod payload;
pub mod query;

pub use content::{
    Category, ContentKind, ContentRecord, DownloadLink, Genre, Language, Quality, SeriesFormat,
};
pub use episode::{Episode, EpisodeList};
pub use notification::{
    NewNotification, Notification, NotificationReply, NotificationSettings, NotificationType,
    ReplyRequest,
};
pub use payload::{ContentPayload, EpisodePatch, EpisodePayload, LinkPayload};
pub use query::{
    CatalogStats, ContentFilter, EpisodeListing, ListParams, ListResponse, MovieSummary,
    SeriesSummary, StatusFlag, Suggestion, SuggestionParams,
};
