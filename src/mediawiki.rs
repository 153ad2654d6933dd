//! Blocking MediaWiki API client shared by the Wikipedia and Wiktionary
//! collaborators.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use crate::error::Result;

/// Minimum spacing between requests, shared by every worker that holds it.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    next_slot: Mutex<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(Instant::now()),
        }
    }

    /// Block until this caller's slot comes up.
    pub fn wait(&self) {
        let delay = {
            let mut next = self.next_slot.lock().unwrap_or_else(|e| e.into_inner());
            let now = Instant::now();
            let slot = (*next).max(now);
            *next = slot + self.interval;
            slot - now
        };
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

/// One HTTP client plus the politeness throttle; cheap to clone.
#[derive(Debug, Clone)]
pub struct MediaWikiClient {
    http: reqwest::blocking::Client,
    throttle: Arc<Throttle>,
}

impl MediaWikiClient {
    pub fn new(user_agent: &str, timeout: Duration, throttle: Arc<Throttle>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, throttle })
    }

    /// GET `api_url` with the given query parameters and decode the JSON body.
    /// Single attempt; failures are returned to the caller.
    pub fn query<T: DeserializeOwned>(&self, api_url: &str, params: &[(&str, &str)]) -> Result<T> {
        self.throttle.wait();
        let body = self
            .http
            .get(api_url)
            .query(params)
            .send()?
            .error_for_status()?
            .json::<T>()?;
        Ok(body)
    }
}
