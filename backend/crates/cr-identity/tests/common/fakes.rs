use cr_core::PlatformType;
use cr_identity::{
    AccessGrant, ChannelSnapshot, PlatformApiError, PlatformApiResult, PlatformDataApi,
    TokenExchange,
};

use std::panic::Location;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use error_location::ErrorLocation;
use zeroize::Zeroizing;

/// What a fake endpoint should do when called
#[derive(Clone)]
pub enum FakeOutcome {
    Ok,
    Unauthorized(u16),
    Status(u16),
    InvalidGrant,
    NoChannel,
}

impl FakeOutcome {
    fn into_error(self) -> Option<PlatformApiError> {
        let location = ErrorLocation::from(Location::caller());
        match self {
            Self::Ok => None,
            Self::Unauthorized(status) => Some(PlatformApiError::Unauthorized { status, location }),
            Self::Status(status) => Some(PlatformApiError::Status { status, location }),
            Self::InvalidGrant => Some(PlatformApiError::InvalidGrant {
                message: "Token has been expired or revoked.".to_string(),
                location,
            }),
            Self::NoChannel => Some(PlatformApiError::NoChannel { location }),
        }
    }
}

pub struct FakeTokenExchange {
    outcome: FakeOutcome,
    rotated_refresh: Option<String>,
    pub calls: AtomicUsize,
    pub last_refresh_token: Mutex<Option<String>>,
}

impl FakeTokenExchange {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            rotated_refresh: None,
            calls: AtomicUsize::new(0),
            last_refresh_token: Mutex::new(None),
        }
    }

    pub fn rotating(rotated_refresh: &str) -> Self {
        Self {
            rotated_refresh: Some(rotated_refresh.to_string()),
            ..Self::new(FakeOutcome::Ok)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenExchange for FakeTokenExchange {
    async fn exchange(
        &self,
        _platform: PlatformType,
        refresh_token: &str,
    ) -> PlatformApiResult<AccessGrant> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_refresh_token.lock().unwrap() = Some(refresh_token.to_string());

        if let Some(err) = self.outcome.clone().into_error() {
            return Err(err);
        }

        Ok(AccessGrant {
            access_token: Zeroizing::new("ya29.fresh-access".to_string()),
            refresh_token: self.rotated_refresh.clone().map(Zeroizing::new),
            expires_in: Some(3599),
        })
    }
}

pub struct FakeDataApi {
    outcome: FakeOutcome,
    subscriber_count: String,
    pub calls: AtomicUsize,
    pub last_access_token: Mutex<Option<String>>,
}

impl FakeDataApi {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self::with_count(outcome, "1234")
    }

    pub fn with_count(outcome: FakeOutcome, subscriber_count: &str) -> Self {
        Self {
            outcome,
            subscriber_count: subscriber_count.to_string(),
            calls: AtomicUsize::new(0),
            last_access_token: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlatformDataApi for FakeDataApi {
    async fn fetch_channel(
        &self,
        _platform: PlatformType,
        access_token: &str,
    ) -> PlatformApiResult<ChannelSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_access_token.lock().unwrap() = Some(access_token.to_string());

        if let Some(err) = self.outcome.clone().into_error() {
            return Err(err);
        }

        Ok(ChannelSnapshot {
            id: "UC-test-channel".to_string(),
            title: "Test Channel".to_string(),
            subscriber_count: self.subscriber_count.clone(),
        })
    }
}
