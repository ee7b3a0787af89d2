//! Pin identities and the board I/O seam.
//!
//! The iBIT board wires its motor driver and servo headers to fixed
//! micro:bit edge-connector pins:
//!
//! | Pin | Role |
//! |-----|------|
//! | P8  | Motor channel 1 direction (digital) |
//! | P1  | Motor channel 1 speed (10-bit PWM) |
//! | P12 | Motor channel 2 direction (digital) |
//! | P2  | Motor channel 2 speed (10-bit PWM) |
//! | P13 | Servo 1 pulse output |
//! | P14 | Servo 2 pulse output |

use embedded_hal::digital::PinState;

/// Digital direction inputs of the on-board motor driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitalPin {
    /// Motor channel 1 direction.
    P8,
    /// Motor channel 2 direction.
    P12,
}

/// PWM-capable outputs: motor speed and servo pulse pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogPin {
    /// Motor channel 1 speed.
    P1,
    /// Motor channel 2 speed.
    P2,
    /// Servo 1 pulse output.
    P13,
    /// Servo 2 pulse output.
    P14,
}

/// One hardware write, fully determined by the command that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinWrite {
    /// Direction pin level.
    Digital(DigitalPin, PinState),
    /// Duty level in the 10-bit analog domain, 0..=1023 for in-range speeds.
    Analog(AnalogPin, u16),
    /// Servo target angle in degrees.
    ServoAngle(AnalogPin, u8),
    /// Raw servo pulse width in microseconds.
    ServoPulse(AnalogPin, u16),
}

/// Board I/O capability driven by the command translator.
///
/// Implementations write the requested level to the physical pin and
/// return immediately; no pin is ever read back. [`EdgeConnector`]
/// implements this over `embedded-hal` pins, and tests implement it
/// with a recording fake.
///
/// [`EdgeConnector`]: crate::hal::EdgeConnector
pub trait PinIo {
    type Error;

    /// Set a direction pin high or low.
    fn digital_write(&mut self, pin: DigitalPin, level: PinState) -> Result<(), Self::Error>;

    /// Set a PWM pin's duty level in the 10-bit analog domain.
    fn analog_write(&mut self, pin: AnalogPin, level: u16) -> Result<(), Self::Error>;

    /// Command a servo angle in degrees on a servo pin.
    fn servo_write(&mut self, pin: AnalogPin, degrees: u8) -> Result<(), Self::Error>;

    /// Set a servo pin's raw pulse width in microseconds; 0 releases
    /// the servo.
    fn servo_set_pulse(&mut self, pin: AnalogPin, micros: u16) -> Result<(), Self::Error>;

    /// Dispatch a single [`PinWrite`] to the matching primitive.
    fn apply(&mut self, write: PinWrite) -> Result<(), Self::Error> {
        match write {
            PinWrite::Digital(pin, level) => self.digital_write(pin, level),
            PinWrite::Analog(pin, level) => self.analog_write(pin, level),
            PinWrite::ServoAngle(pin, degrees) => self.servo_write(pin, degrees),
            PinWrite::ServoPulse(pin, micros) => self.servo_set_pulse(pin, micros),
        }
    }
}
