//! Display node loop
//!
//! Each pass polls the radio once, redraws when a reading arrives or the
//! layout's schedule says so, and emits the framebuffer dump on its own
//! timer. All timing goes through wrapping tick arithmetic.

use core::fmt::Write;

use barolink_core::config::{LinkConfig, ReceiverConfig};
use barolink_core::state::{DisplayState, ReceiverEvent, ReceiverPhase};
use barolink_display::{
    render_value, write_dump, DisplayEngine, LayoutConfig, PanelConfig, PanelTransport, Rendered,
};
use barolink_hal::{Radio, TickSource};
use barolink_protocol::{decode_temperature, PeerRegistration, TelemetryLink};
use embedded_hal::delay::DelayNs;

use crate::error::StartupError;

/// Everything the display node needs to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverSetup {
    pub panel: PanelConfig,
    pub layout: LayoutConfig,
    pub link: LinkConfig,
    pub receiver: ReceiverConfig,
}

impl Default for ReceiverSetup {
    fn default() -> Self {
        Self {
            panel: PanelConfig::default(),
            layout: LayoutConfig::default(),
            link: LinkConfig::receiver(),
            receiver: ReceiverConfig::default(),
        }
    }
}

/// What one loop pass did
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PassReport {
    /// Temperature accepted this pass
    pub received: Option<f64>,
    /// Placement of the redraw, if one happened
    pub rendered: Option<Rendered>,
    /// Whether the framebuffer dump was written
    pub dumped: bool,
}

/// Display node: panel, link, clock, loop delay and a dump sink
pub struct ReceiverNode<T, R, C, D, W> {
    engine: DisplayEngine<T>,
    link: TelemetryLink<R>,
    clock: C,
    delay: D,
    sink: W,
    layout: LayoutConfig,
    config: ReceiverConfig,
    state: DisplayState,
    phase: ReceiverPhase,
}

impl<T, R, C, D, W> ReceiverNode<T, R, C, D, W>
where
    T: PanelTransport,
    R: Radio,
    C: TickSource,
    D: DelayNs,
    W: Write,
{
    /// Bring the panel and radio up
    pub fn start(
        transport: T,
        radio: R,
        clock: C,
        delay: D,
        sink: W,
        setup: ReceiverSetup,
    ) -> Result<Self, StartupError<T::Error, R::Error>> {
        let mut engine = DisplayEngine::bring_up(transport, setup.panel)?;
        engine.contrast(setup.panel.contrast)?;

        let (link, init) = TelemetryLink::initialize(radio, setup.link)?;
        if let PeerRegistration::Failed(peer) = init.peer {
            warn!("peer registration failed for {}", peer.as_bytes());
        }
        info!("listening on channel {}", init.channel);

        let now = clock.now_ms();
        let state = DisplayState::new(
            now,
            setup.layout.redraw_interval_ms,
            setup.receiver.dump_interval_ms,
        );

        Ok(Self {
            engine,
            link,
            clock,
            delay,
            sink,
            layout: setup.layout,
            config: setup.receiver,
            state,
            phase: ReceiverPhase::default().transition(ReceiverEvent::Ready),
        })
    }

    pub fn phase(&self) -> ReceiverPhase {
        self.phase
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn engine(&self) -> &DisplayEngine<T> {
        &self.engine
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// One loop pass without the trailing delay
    pub fn poll_once(&mut self) -> PassReport {
        let mut report = PassReport::default();

        match self.link.poll() {
            Ok(Some(datagram)) if datagram.payload.is_empty() => {}
            Ok(Some(datagram)) => {
                debug!(
                    "payload {=[u8]} from {}",
                    datagram.payload.as_slice(),
                    datagram.sender.as_bytes()
                );
                match decode_temperature(&datagram.payload) {
                    Ok(temperature) => {
                        let now = self.clock.now_ms();
                        self.state.apply_reading(temperature, now);
                        info!("temperature updated: {}", temperature);
                        report.received = Some(temperature);
                        report.rendered = Some(self.redraw(now));
                    }
                    Err(e) => warn!("bad payload: {}", e),
                }
            }
            Ok(None) => {}
            Err(_) => warn!("radio poll failed"),
        }

        let now = self.clock.now_ms();
        let hide_ms = self.layout.unit_hide_ms();
        if report.rendered.is_none()
            && (self.state.render_due(now) || self.state.indicator_expired(now, hide_ms))
        {
            report.rendered = Some(self.redraw(now));
        }

        if self.config.dump_enabled && self.state.dump.poll(now) {
            report.dumped = write_dump(self.engine.framebuffer(), &mut self.sink).is_ok();
            if !report.dumped {
                warn!("framebuffer dump truncated");
            }
        }

        report
    }

    /// Render the current temperature and push it to the panel
    fn redraw(&mut self, now: u32) -> Rendered {
        let unit_visible = !self
            .state
            .within_receive_window(now, self.layout.unit_hide_ms());
        let rendered = render_value(
            self.engine.framebuffer_mut(),
            &self.layout,
            self.state.current_temperature,
            unit_visible,
        );
        if rendered.truncated {
            warn!("reading too long for the panel, shown truncated");
        }
        if self.engine.show().is_err() {
            warn!("panel update failed");
        }
        info!(
            "display updated: {} at scale {}",
            self.state.current_temperature, rendered.scale
        );
        self.state.mark_rendered(now, !unit_visible);
        rendered
    }

    /// Poll and redraw forever
    pub fn run(mut self) -> ! {
        loop {
            let _ = self.poll_once();
            self.delay.delay_ms(self.config.poll_interval_ms);
        }
    }
}
