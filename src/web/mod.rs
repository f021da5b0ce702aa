//! Web server exposing the sample store and sequence engine over HTTP.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! paleoseq serve
//!
//! # Custom port and auto-open browser
//! paleoseq serve --port 3000 --open
//!
//! # Bind to all interfaces
//! paleoseq serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Upload and query page
//! - `POST /api/upload-csv` - Ingest a sample metadata CSV (multipart form)
//! - `GET /api/samples` - List ingested samples
//! - `POST /api/samples` - Ingest samples as a JSON array
//! - `POST /api/sample` - Ingest a single sample
//! - `GET /api/sequence?sample_id=` - Synthesized sequence for one sample
//! - `GET /api/compare?id1=&id2=` - Pairwise similarity between two samples
//! - `POST /api/ask` - Question answering over the ingested data

pub mod server;
