//! High-level board operations over a [`PinIo`] capability.

use crate::commands::{
    MotorChannel, MotorCommand, MotorDirection, ServoCommand, ServoId, SpinDirection, TurnDirection,
};
use crate::pins::PinIo;

/// The iBIT board: two motor channels and two servo outputs behind a
/// [`PinIo`] capability.
///
/// Every operation is stateless and idempotent: it fully determines the
/// state of the pins it touches and reads nothing back. Writes within
/// one operation are issued in sequence; if one fails the error is
/// returned and the remaining writes of that operation are skipped, so
/// a failing I/O layer can leave a partial pin update behind.
pub struct Ibit<IO: PinIo> {
    io: IO,
}

impl<IO: PinIo> Ibit<IO> {
    pub fn new(io: IO) -> Self {
        Ibit { io }
    }

    /// Release the underlying I/O capability.
    pub fn free(self) -> IO {
        self.io
    }

    /// Execute a motor command, issuing its pin writes in order.
    pub fn run(&mut self, command: MotorCommand) -> Result<(), IO::Error> {
        for write in command.writes() {
            self.io.apply(write)?;
        }
        Ok(())
    }

    /// Execute a servo command.
    pub fn run_servo(&mut self, command: ServoCommand) -> Result<(), IO::Error> {
        self.io.apply(command.write())
    }

    /// Drive both channels in the same rotation sense at a 0..=100
    /// speed percentage.
    pub fn drive(&mut self, direction: MotorDirection, speed: u8) -> Result<(), IO::Error> {
        self.run(MotorCommand::Drive { direction, speed })
    }

    /// Pivot turn: the inner wheel idles while the outer one is driven.
    pub fn turn(&mut self, direction: TurnDirection, speed: u8) -> Result<(), IO::Error> {
        self.run(MotorCommand::Turn { direction, speed })
    }

    /// Spin in place: both wheels driven with opposite polarity.
    pub fn spin(&mut self, direction: SpinDirection, speed: u8) -> Result<(), IO::Error> {
        self.run(MotorCommand::Spin { direction, speed })
    }

    /// Brake both channels regardless of prior state.
    pub fn stop(&mut self) -> Result<(), IO::Error> {
        self.run(MotorCommand::Stop)
    }

    /// Drive one channel independently; the other channel's pins are
    /// not touched.
    pub fn drive_single(
        &mut self,
        channel: MotorChannel,
        direction: MotorDirection,
        speed: u8,
    ) -> Result<(), IO::Error> {
        self.run(MotorCommand::Single {
            channel,
            direction,
            speed,
        })
    }

    /// Hold a servo at an angle, 0..=180 degrees by contract.
    pub fn servo(&mut self, servo: ServoId, degrees: u8) -> Result<(), IO::Error> {
        self.run_servo(ServoCommand::SetAngle { servo, degrees })
    }

    /// Release a servo: pulse width 0, no holding torque.
    pub fn release_servo(&mut self, servo: ServoId) -> Result<(), IO::Error> {
        self.run_servo(ServoCommand::Release { servo })
    }
}
