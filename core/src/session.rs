//! Adapters that hand an `Endpoint` to a networking client.
//!
//! # Design
//! The core never performs I/O. A `Session` is whatever client the caller
//! brings; it only has to execute one `HttpRequest`. `SessionExt` layers the
//! task-style conveniences on top: each one materializes the request first,
//! returning `EndpointError` to the caller before anything is scheduled, then
//! delegates to the session unchanged.
//!
//! Tasks own a clone of the session so they can be moved to a worker thread.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crate::endpoint::Endpoint;
use crate::error::EndpointError;
use crate::http::{HttpRequest, HttpResponse};

/// An external networking client able to execute a materialized request.
pub trait Session {
    /// Transport failures. Must absorb `EndpointError` so task helpers can
    /// report everything through one type.
    type Error: From<EndpointError>;

    /// Execute `request` and return the response, whatever its status.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Self::Error>;
}

/// A data retrieval bound to a session. Nothing happens until `run` or
/// `resume` is called.
#[derive(Debug)]
pub struct DataTask<S> {
    session: S,
    request: HttpRequest,
}

impl<S: Session> DataTask<S> {
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// Execute on the current thread.
    pub fn run(self) -> Result<HttpResponse, S::Error> {
        self.session.send(&self.request)
    }

    /// Execute on a new thread and hand the outcome to `completion`.
    pub fn resume<F>(self, completion: F) -> JoinHandle<()>
    where
        S: Send + 'static,
        F: FnOnce(Result<HttpResponse, S::Error>) + Send + 'static,
    {
        thread::spawn(move || completion(self.run()))
    }
}

/// What a finished download left on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub path: PathBuf,
    pub len: u64,
}

/// A download bound to a session: the response body is written to
/// `destination`, replacing any existing file.
#[derive(Debug)]
pub struct DownloadTask<S> {
    session: S,
    request: HttpRequest,
    destination: PathBuf,
}

impl<S> DownloadTask<S>
where
    S: Session,
    S::Error: From<io::Error>,
{
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn run(self) -> Result<Download, S::Error> {
        let response = self.session.send(&self.request)?;
        fs::write(&self.destination, &response.body)?;
        tracing::debug!(
            path = %self.destination.display(),
            status = response.status,
            len = response.body.len(),
            "download written"
        );
        Ok(Download {
            status: response.status,
            headers: response.headers,
            path: self.destination,
            len: response.body.len() as u64,
        })
    }

    pub fn resume<F>(self, completion: F) -> JoinHandle<()>
    where
        S: Send + 'static,
        F: FnOnce(Result<Download, S::Error>) + Send + 'static,
    {
        thread::spawn(move || completion(self.run()))
    }
}

/// Task conveniences for every cloneable `Session`.
pub trait SessionExt: Session + Clone {
    /// Bind `endpoint` to this session without starting it.
    fn data_task(&self, endpoint: &Endpoint) -> Result<DataTask<Self>, EndpointError> {
        Ok(DataTask {
            session: self.clone(),
            request: endpoint.url_request()?,
        })
    }

    /// Start a data retrieval immediately; `completion` runs on the worker
    /// thread.
    fn data_task_with<F>(&self, endpoint: &Endpoint, completion: F) -> Result<JoinHandle<()>, EndpointError>
    where
        Self: Send + 'static,
        F: FnOnce(Result<HttpResponse, Self::Error>) + Send + 'static,
    {
        Ok(self.data_task(endpoint)?.resume(completion))
    }

    fn download_task(
        &self,
        endpoint: &Endpoint,
        destination: impl Into<PathBuf>,
    ) -> Result<DownloadTask<Self>, EndpointError> {
        Ok(DownloadTask {
            session: self.clone(),
            request: endpoint.url_request()?,
            destination: destination.into(),
        })
    }

    fn download_task_with<F>(
        &self,
        endpoint: &Endpoint,
        destination: impl Into<PathBuf>,
        completion: F,
    ) -> Result<JoinHandle<()>, EndpointError>
    where
        Self: Send + 'static,
        Self::Error: From<io::Error>,
        F: FnOnce(Result<Download, Self::Error>) + Send + 'static,
    {
        Ok(self.download_task(endpoint, destination)?.resume(completion))
    }

    /// Start an upload of `endpoint.data`; without data the request goes out
    /// with no body.
    fn upload_task_with<F>(&self, endpoint: &Endpoint, completion: F) -> Result<JoinHandle<()>, EndpointError>
    where
        Self: Send + 'static,
        F: FnOnce(Result<HttpResponse, Self::Error>) + Send + 'static,
    {
        let task = self.data_task(endpoint)?;
        tracing::debug!(
            url = %task.request.uri(),
            len = task.request.body.as_ref().map_or(0, Vec::len),
            "starting upload"
        );
        Ok(task.resume(completion))
    }

    /// Run a data retrieval on tokio's blocking pool.
    ///
    /// Must be called from within a tokio runtime.
    #[cfg(feature = "tokio")]
    fn data_task_async(
        &self,
        endpoint: &Endpoint,
    ) -> Result<tokio::task::JoinHandle<Result<HttpResponse, Self::Error>>, EndpointError>
    where
        Self: Send + 'static,
        Self::Error: Send + 'static,
    {
        let task = self.data_task(endpoint)?;
        Ok(tokio::task::spawn_blocking(move || task.run()))
    }
}

impl<S: Session + Clone> SessionExt for S {}
