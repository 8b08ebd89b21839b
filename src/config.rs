use crate::{
    congestion::{CongestionController, brutal::Brutal, tracing::TracingController},
    error::{Error, Result},
    params::Params,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CongestionControllerKind {
    #[default]
    Brutal,
}

/// How many seconds of delivery statistics to keep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WindowSlots {
    Three,
    Four,
    #[default]
    Five,
}

impl WindowSlots {
    pub fn get(&self) -> usize {
        match self {
            WindowSlots::Three => 3,
            WindowSlots::Four => 4,
            WindowSlots::Five => 5,
        }
    }
}

impl TryFrom<usize> for WindowSlots {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            3 => Ok(WindowSlots::Three),
            4 => Ok(WindowSlots::Four),
            5 => Ok(WindowSlots::Five),
            _ => Err(Error::InvalidConfig("window slots must be 3, 4 or 5")),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BrutalConfig {
    /// Rate applied on init, bytes per second. Defaults to 125000 (1 Mbps).
    pub initial_rate: Option<u64>,

    /// cwnd gain applied on init, in tenths. Defaults to 20 (2.0x).
    pub initial_cwnd_gain: Option<u32>,
}

impl BrutalConfig {
    pub fn initial_params(&self) -> Result<Params> {
        let defaults = Params::default();
        let params = Params {
            rate: self.initial_rate.unwrap_or(defaults.rate),
            cwnd_gain: self.initial_cwnd_gain.unwrap_or(defaults.cwnd_gain),
        };
        params
            .validate()
            .map_err(|_| Error::InvalidConfig("initial params out of range"))?;
        Ok(params)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CongestionConfig {
    pub kind: CongestionControllerKind,
    pub window_slots: WindowSlots,
    pub brutal: BrutalConfig,
    /// Log every change of the controller's state.
    pub tracing: bool,
}

impl CongestionConfig {
    /// Builds a fresh controller for one connection.
    pub fn create(&self) -> Result<Box<dyn CongestionController>> {
        let params = self.brutal.initial_params()?;

        fn build<const SLOTS: usize>(
            params: Params,
            traced: bool,
        ) -> Box<dyn CongestionController> {
            let brutal = Brutal::<SLOTS>::new(params);
            if traced {
                tracing::debug!("enabling congestion tracing");
                Box::new(TracingController::new(brutal))
            } else {
                Box::new(brutal)
            }
        }

        let controller = match (self.kind, self.window_slots) {
            (CongestionControllerKind::Brutal, WindowSlots::Three) => {
                build::<3>(params, self.tracing)
            }
            (CongestionControllerKind::Brutal, WindowSlots::Four) => {
                build::<4>(params, self.tracing)
            }
            (CongestionControllerKind::Brutal, WindowSlots::Five) => {
                build::<5>(params, self.tracing)
            }
        };
        Ok(controller)
    }
}
