use std::{future::Future, marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    error::TaskError,
    task::{Task, TaskRef},
};

/// Task backed by a closure.
pub struct FnTask<T, F> {
    name: &'static str,
    f: F,
    _out: PhantomData<fn() -> T>,
}

impl<T, F, Fut> FnTask<T, F>
where
    T: Send + 'static,
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self {
            name,
            f,
            _out: PhantomData,
        }
    }

    pub fn arc(name: &'static str, f: F) -> TaskRef<T> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<T, F, Fut> Task for FnTask<T, F>
where
    T: Send + 'static,
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
{
    type Output = T;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self, ctx: CancellationToken) -> Result<T, TaskError> {
        (self.f)(ctx).await
    }
}
