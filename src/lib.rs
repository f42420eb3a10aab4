//! # Intern FAQ Desk
//!
//! FAQ chatbot service for the MRSAC internship management portal.
//!
//! A fixed knowledge base of question/category/answer records is loaded
//! once at startup and indexed by [`intern_faq_core::matcher::FaqIndex`].
//! Each incoming question is fuzzily scored against that index; the best
//! entry within the similarity threshold answers it, otherwise the user is
//! pointed to the support contact.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ Knowledge    │──▶│  FaqIndex    │──▶│  /chatbot    │
//! │ base (TOML)  │   │ (built once) │   │  (axum)      │
//! └──────────────┘   └──────┬───────┘   └──────────────┘
//!                           │
//!                           ▼
//!                    ┌──────────────┐
//!                    │  CLI (faq)   │
//!                    └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! faq check                         # validate config + knowledge base
//! faq ask "internship duration"     # answer one question
//! faq serve                         # start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`knowledge`] | Knowledge base loading and index construction |
//! | [`server`] | Chatbot HTTP server |
//! | [`ask`] | `faq ask` command |
//! | [`entries`] | `faq entries` command |
//! | [`check`] | `faq check` command |

pub mod ask;
pub mod check;
pub mod config;
pub mod entries;
pub mod knowledge;
pub mod server;
