//! HTTP request handlers
//!
//! This module organizes all API handlers into logical groups:
//! - `api` - Health check and session status endpoints
//! - `speak` - Text-to-speech REST API
//! - `voices` - Voice listing endpoint

pub mod api;
pub mod speak;
pub mod voices;
