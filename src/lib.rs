//! # iBIT robot board driver
//!
//! Driver for the iBIT micro:bit robot controller board: two DC motor
//! channels (direction pin + 10-bit PWM speed pin each) and two servo
//! outputs.
//!
//! The crate translates discrete motion commands (drive, turn, spin,
//! stop, per-channel drive, servo angle, servo release) into fixed
//! sequences of pin writes. Speed percentages (0..=100) rescale
//! linearly to the 10-bit analog domain (0..=1023); servo angles pass
//! through to the pulse generator unscaled.
//!
//! All hardware access goes through the [`PinIo`] capability, so the
//! translation logic tests against a recording fake. [`EdgeConnector`]
//! implements [`PinIo`] over `embedded-hal` `OutputPin`/`SetDutyCycle`
//! pins for use on real hardware.
//!
//! ```no_run
//! # fn run<IO: ibit_driver::PinIo>(io: IO) -> Result<(), IO::Error> {
//! use ibit_driver::{Ibit, MotorDirection, ServoId, TurnDirection};
//!
//! let mut bot = Ibit::new(io);
//! bot.drive(MotorDirection::Forward, 50)?;
//! bot.turn(TurnDirection::Left, 30)?;
//! bot.servo(ServoId::S1, 90)?;
//! bot.stop()?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod commands;
pub mod hal;
pub mod pins;

pub use board::Ibit;
pub use commands::{
    scaled_speed, MotorChannel, MotorCommand, MotorDirection, ServoCommand, ServoId,
    SpinDirection, TurnDirection,
};
pub use hal::{EdgeConnector, EdgeError};
pub use pins::{AnalogPin, DigitalPin, PinIo, PinWrite};
