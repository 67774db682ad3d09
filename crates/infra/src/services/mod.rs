mod push;

pub use push::{FcmPushGateway, IPushGateway, InMemoryPushGateway, PushError, FCM_API_BASE_URL};
