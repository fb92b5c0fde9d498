macro_rules! api_path {
    ($path:literal) => {
        concat!("/api/extensions", $path)
    };
}

/// Route definitions shared by the server router and its tests/clients.
pub mod extensions {
    pub const COLLECTION: &str = api_path!("");
    pub const ADD_CUSTOM: &str = api_path!("/add");
    pub const CUSTOM_ITEM: &str = api_path!("/custom/{name}");
    pub const FIXED_ITEM: &str = api_path!("/fixed/{name}");
    pub const FIXED_BATCH: &str = api_path!("/fixed/batch");

    /// Last segment of [`FIXED_BATCH`]. The static route shadows
    /// [`FIXED_ITEM`] for a fixed extension with this name.
    pub const BATCH_SEGMENT: &str = "batch";

    /// Query parameter carrying the candidate for [`ADD_CUSTOM`].
    pub const ADD_CUSTOM_PARAM: &str = "customExtension";

    pub fn custom_item(name: &str) -> String {
        CUSTOM_ITEM.replace("{name}", name)
    }

    pub fn fixed_item(name: &str) -> String {
        FIXED_ITEM.replace("{name}", name)
    }
}

pub const WEBSOCKET: &str = "/ws";
pub const PING: &str = "/ping";
pub const HEALTH: &str = "/health";
