//! Tracing support for diagnostics and performance monitoring.
//!
//! The library itself only emits events and spans through the `tracing`
//! facade.  When the `tracing` feature is enabled this module can install a
//! subscriber that prints events to stderr and accumulates the time spent in
//! each named span; when it's disabled these functions are no-ops.

#[cfg(feature = "tracing")]
mod enabled {
    use std::{
        cell::RefCell,
        collections::BTreeMap,
        collections::HashMap,
        io,
        sync::Once,
        time::{Duration, Instant},
    };

    use tracing_subscriber::{
        Layer, Registry,
        filter::LevelFilter,
        fmt,
        layer::{Context, SubscriberExt},
        registry::LookupSpan,
        util::SubscriberInitExt,
    };

    thread_local! {
        #[allow(clippy::type_complexity)]
        static TIMING_SCOPES: RefCell<HashMap<TimingScope, BTreeMap<&'static str, (Duration, usize)>>> =
            RefCell::new(HashMap::new());
        static TIMING_SCOPE: RefCell<TimingScope> = const { RefCell::new(TimingScope::Test) };
    }

    /// Bucket that span timings are accumulated into.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum TimingScope {
        Test,
        Construction,
        Algorithms,
    }

    pub struct TimingScopeGuard {
        previous: TimingScope,
    }

    impl Drop for TimingScopeGuard {
        fn drop(&mut self) {
            TIMING_SCOPE.with(|scope| {
                *scope.borrow_mut() = self.previous;
            });
        }
    }

    /// Routes span timings on this thread into `scope` until the returned
    /// guard is dropped.
    pub fn set_timing_scope(scope: TimingScope) -> TimingScopeGuard {
        let previous = TIMING_SCOPE.with(|current| {
            let mut current = current.borrow_mut();
            let prev = *current;
            *current = scope;
            prev
        });
        TimingScopeGuard { previous }
    }

    struct TimingLayer;

    impl<S> Layer<S> for TimingLayer
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(
            &self,
            _attrs: &tracing::span::Attributes<'_>,
            id: &tracing::Id,
            ctx: Context<'_, S>,
        ) {
            if let Some(span) = ctx.span(id) {
                span.extensions_mut().insert(Instant::now());
            }
        }

        fn on_close(&self, id: tracing::Id, ctx: Context<'_, S>) {
            if let Some(span) = ctx.span(&id) {
                let name = span.metadata().name();
                if let Some(start) = span.extensions().get::<Instant>() {
                    let elapsed = start.elapsed();
                    let scope = TIMING_SCOPE.with(|scope| *scope.borrow());
                    TIMING_SCOPES.with(|totals| {
                        let mut totals = totals.borrow_mut();
                        let entries = totals.entry(scope).or_insert_with(BTreeMap::new);
                        let entry = entries.entry(name).or_insert((Duration::ZERO, 0));
                        entry.0 += elapsed;
                        entry.1 += 1;
                    });
                }
            }
        }
    }

    /// Installs the global subscriber: a stderr formatter for warnings and
    /// errors plus the timing layer.  Only the first call has any effect, and
    /// none if another subscriber is already installed.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = Registry::default()
                .with(TimingLayer)
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_filter(LevelFilter::WARN),
                )
                .try_init();
        });
    }

    #[doc(hidden)]
    pub fn dump_method_timings() {
        dump_scope_timings(TimingScope::Test);
        dump_scope_timings(TimingScope::Construction);
        dump_scope_timings(TimingScope::Algorithms);
    }

    #[doc(hidden)]
    pub fn reset_method_timings() {
        init_tracing();
        TIMING_SCOPES.with(|totals| totals.borrow_mut().clear());
    }

    /// Gets the accumulated `(total time, span count)` for spans named `name`
    /// in `scope` on this thread.
    pub fn span_timing(scope: TimingScope, name: &str) -> Option<(Duration, usize)> {
        TIMING_SCOPES.with(|totals| {
            totals
                .borrow()
                .get(&scope)
                .and_then(|entries| entries.get(name).copied())
        })
    }

    fn dump_scope_timings(scope: TimingScope) {
        TIMING_SCOPES.with(|totals| {
            let totals = totals.borrow();
            let label = format!("{scope:?} timings (desc):");
            let Some(entries) = totals.get(&scope) else {
                eprintln!("{}", label);
                return;
            };
            let mut entries: Vec<_> = entries.iter().collect();
            entries.sort_by(|a, b| b.1.0.cmp(&a.1.0));
            eprintln!("{}", label);
            for (name, (duration, count)) in entries {
                eprintln!("  {name}: {:?} ({}x)", duration, count);
            }
        });
    }
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    use std::time::Duration;

    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum TimingScope {
        Test,
        Construction,
        Algorithms,
    }

    pub struct TimingScopeGuard;

    pub fn set_timing_scope(_scope: TimingScope) -> TimingScopeGuard {
        TimingScopeGuard
    }

    pub fn init_tracing() {
        // No-op when tracing is disabled
    }

    #[doc(hidden)]
    pub fn dump_method_timings() {
        // No-op when tracing is disabled
    }

    #[doc(hidden)]
    pub fn reset_method_timings() {
        // No-op when tracing is disabled
    }

    pub fn span_timing(_scope: TimingScope, _name: &str) -> Option<(Duration, usize)> {
        None
    }
}

#[cfg(feature = "tracing")]
pub use enabled::*;

#[cfg(not(feature = "tracing"))]
pub use disabled::*;
