//! Motion selectors and the command-to-pin-write translation table.
//!
//! Every command renders to a fixed, ordered sequence of [`PinWrite`]s;
//! nothing here touches hardware. The dual-channel motor commands
//! always write both channels in the board's native order (channel 1
//! direction, channel 1 speed, channel 2 direction, channel 2 speed),
//! while [`MotorCommand::Single`] writes exactly one channel and leaves
//! the other's pins alone.

use embedded_hal::digital::PinState;
use heapless::Vec;

use crate::pins::{AnalogPin, DigitalPin, PinWrite};

/// Full scale of the 10-bit analog write domain.
pub const ANALOG_MAX: u16 = 1023;

/// Longest pin-write sequence any command renders to.
pub const MAX_WRITES: usize = 4;

/// Rotation sense for a motor command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotorDirection {
    Forward,
    Backward,
}

/// Pivot-turn sense: one wheel driven, the other idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnDirection {
    Left,
    Right,
}

/// In-place spin sense: both wheels driven with opposite polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpinDirection {
    Left,
    Right,
}

/// One of the two servo headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServoId {
    S1,
    S2,
}

impl ServoId {
    /// Pulse output pin of this servo header.
    pub fn pin(self) -> AnalogPin {
        match self {
            ServoId::S1 => AnalogPin::P13,
            ServoId::S2 => AnalogPin::P14,
        }
    }
}

/// One of the two independent motor channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotorChannel {
    M1,
    M2,
}

/// Integer linear rescale with round-to-nearest.
///
/// Requires `in_max > in_min` and `value >= in_min`. `value` above
/// `in_max` extrapolates past `out_max`; callers relying on the output
/// range must constrain the input range themselves.
pub fn map_range(value: u32, in_min: u32, in_max: u32, out_min: u32, out_max: u32) -> u32 {
    debug_assert!(in_max > in_min && value >= in_min);
    let span_in = in_max - in_min;
    let span_out = out_max - out_min;
    out_min + ((value - in_min) * span_out + span_in / 2) / span_in
}

/// Rescale a 0..=100 speed percentage to the 10-bit analog domain.
///
/// Values above 100 are not clamped and scale past [`ANALOG_MAX`],
/// matching the board's original behavior of trusting the caller's
/// range contract.
pub fn scaled_speed(percent: u8) -> u16 {
    map_range(u32::from(percent), 0, 100, 0, u32::from(ANALOG_MAX)) as u16
}

/// A motor command and its parameters.
///
/// Speeds are percentages, 0..=100 by contract (see [`scaled_speed`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotorCommand {
    /// Drive both channels in the same rotation sense.
    Drive { direction: MotorDirection, speed: u8 },
    /// Pivot turn: idle the inner wheel, drive the outer one.
    Turn { direction: TurnDirection, speed: u8 },
    /// Spin in place: both wheels driven, opposite polarity.
    Spin { direction: SpinDirection, speed: u8 },
    /// Brake both channels: braking polarity, zero speed.
    Stop,
    /// Drive one channel, leaving the other channel's pins untouched.
    Single {
        channel: MotorChannel,
        direction: MotorDirection,
        speed: u8,
    },
}

impl MotorCommand {
    /// Render this command to its ordered pin-write sequence.
    pub fn writes(self) -> Vec<PinWrite, MAX_WRITES> {
        use MotorDirection::{Backward, Forward};
        use PinState::{High, Low};

        match self {
            MotorCommand::Drive { direction, speed } => {
                let s = scaled_speed(speed);
                match direction {
                    Forward => dual(High, s, Low, s),
                    Backward => dual(Low, s, High, s),
                }
            }
            MotorCommand::Turn { direction, speed } => {
                let s = scaled_speed(speed);
                match direction {
                    TurnDirection::Left => dual(High, 0, Low, s),
                    TurnDirection::Right => dual(High, s, Low, 0),
                }
            }
            MotorCommand::Spin { direction, speed } => {
                let s = scaled_speed(speed);
                match direction {
                    SpinDirection::Left => dual(Low, s, Low, s),
                    SpinDirection::Right => dual(High, s, High, s),
                }
            }
            MotorCommand::Stop => dual(High, 0, High, 0),
            MotorCommand::Single {
                channel,
                direction,
                speed,
            } => {
                let s = scaled_speed(speed);
                // Forward polarity is inverted between the two channels.
                match (channel, direction) {
                    (MotorChannel::M1, Forward) => single(DigitalPin::P8, High, AnalogPin::P1, s),
                    (MotorChannel::M1, Backward) => single(DigitalPin::P8, Low, AnalogPin::P1, s),
                    (MotorChannel::M2, Forward) => single(DigitalPin::P12, Low, AnalogPin::P2, s),
                    (MotorChannel::M2, Backward) => single(DigitalPin::P12, High, AnalogPin::P2, s),
                }
            }
        }
    }
}

/// A servo command and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServoCommand {
    /// Hold the servo at an angle, 0..=180 degrees by contract. The
    /// angle is passed through to the pulse generator unscaled.
    SetAngle { servo: ServoId, degrees: u8 },
    /// Drop the pulse width to 0, releasing the servo's holding torque.
    Release { servo: ServoId },
}

impl ServoCommand {
    /// Render this command to its single pin write.
    pub fn write(self) -> PinWrite {
        match self {
            ServoCommand::SetAngle { servo, degrees } => PinWrite::ServoAngle(servo.pin(), degrees),
            ServoCommand::Release { servo } => PinWrite::ServoPulse(servo.pin(), 0),
        }
    }
}

/// Write both channels: direction then speed, channel 1 then channel 2.
fn dual(p8: PinState, p1: u16, p12: PinState, p2: u16) -> Vec<PinWrite, MAX_WRITES> {
    let mut seq = Vec::new();
    // Capacity equals the sequence length; the pushes cannot fail.
    let _ = seq.push(PinWrite::Digital(DigitalPin::P8, p8));
    let _ = seq.push(PinWrite::Analog(AnalogPin::P1, p1));
    let _ = seq.push(PinWrite::Digital(DigitalPin::P12, p12));
    let _ = seq.push(PinWrite::Analog(AnalogPin::P2, p2));
    seq
}

/// Write one channel: direction then speed.
fn single(
    dir_pin: DigitalPin,
    dir: PinState,
    speed_pin: AnalogPin,
    speed: u16,
) -> Vec<PinWrite, MAX_WRITES> {
    let mut seq = Vec::new();
    let _ = seq.push(PinWrite::Digital(dir_pin, dir));
    let _ = seq.push(PinWrite::Analog(speed_pin, speed));
    seq
}
