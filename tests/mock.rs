use heapless::Vec;

use cc1101_phy::packet::{PacketHandler, RadioPacket, MAX_PACKET_SIZE};
use cc1101_phy::registers::{status, FIFO};
use cc1101_phy::transport::Transport;

/// Mock transport error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Generic error
    Error,
}

/// One chip operation, recorded in issue order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Reset,
    Strobe(u8),
    WriteRegister(u8, u8),
    ReadRegister(u8),
    WriteBurst(u8, usize),
    ReadBurst(u8, usize),
    SetInterruptEnabled(bool),
}

/// Mock transport for testing
///
/// Records every operation the driver issues, tracks the interrupt mask,
/// and serves scripted RX FIFO content to the driver's read path.
pub struct MockTransport {
    pub ops: Vec<Op, 128>,
    pub last_burst: Option<Vec<u8, MAX_PACKET_SIZE>>,
    pub interrupt_enabled: bool,
    rx_fifo: Vec<u8, 80>,
    rx_pos: usize,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            last_burst: None,
            interrupt_enabled: false,
            rx_fifo: Vec::new(),
            rx_pos: 0,
        }
    }

    /// Script a received frame: length byte, payload, then the two
    /// appended status bytes (raw RSSI, LQI with the CRC flag on top)
    pub fn set_rx_frame(&mut self, payload: &[u8], raw_rssi: u8, lqi_status: u8) {
        self.rx_fifo.clear();
        self.rx_pos = 0;
        self.rx_fifo.push(payload.len() as u8).unwrap();
        self.rx_fifo.extend_from_slice(payload).unwrap();
        self.rx_fifo.push(raw_rssi).unwrap();
        self.rx_fifo.push(lqi_status).unwrap();
    }

    /// Operations issued since `mark` (as returned by `ops.len()`)
    pub fn ops_since(&self, mark: usize) -> &[Op] {
        &self.ops[mark..]
    }

    fn record(&mut self, op: Op) {
        self.ops.push(op).unwrap();
    }

    fn fifo_remaining(&self) -> usize {
        self.rx_fifo.len() - self.rx_pos
    }

    fn next_fifo_byte(&mut self) -> u8 {
        if self.rx_pos < self.rx_fifo.len() {
            let byte = self.rx_fifo[self.rx_pos];
            self.rx_pos += 1;
            byte
        } else {
            0
        }
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.record(Op::Reset);
        Ok(())
    }

    fn strobe(&mut self, command: u8) -> Result<(), Self::Error> {
        self.record(Op::Strobe(command));
        Ok(())
    }

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Self::Error> {
        self.record(Op::WriteRegister(addr, value));
        Ok(())
    }

    fn read_register(&mut self, addr: u8) -> Result<u8, Self::Error> {
        self.record(Op::ReadRegister(addr));
        if addr == status::RXBYTES {
            // Byte count left in the scripted FIFO
            Ok(self.fifo_remaining() as u8)
        } else if addr == FIFO {
            Ok(self.next_fifo_byte())
        } else {
            Ok(0)
        }
    }

    fn write_burst(&mut self, addr: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.record(Op::WriteBurst(addr, data.len()));
        let mut burst = Vec::new();
        burst.extend_from_slice(data).unwrap();
        self.last_burst = Some(burst);
        Ok(())
    }

    fn read_burst(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.record(Op::ReadBurst(addr, buffer.len()));
        for byte in buffer.iter_mut() {
            *byte = self.next_fifo_byte();
        }
        Ok(())
    }

    fn set_interrupt_enabled(&mut self, enabled: bool) -> Result<(), Self::Error> {
        self.record(Op::SetInterruptEnabled(enabled));
        self.interrupt_enabled = enabled;
        Ok(())
    }
}

/// Mock packet handler recording every event the driver delivers
pub struct MockHandler {
    pub tx_completed: Vec<RadioPacket, 4>,
    pub rx_completed: Vec<RadioPacket, 4>,
    pub released: Vec<RadioPacket, 4>,
    pub rssi_reports: Vec<i16, 4>,
    pub alloc_calls: usize,
    pub deny_alloc: bool,
}

impl MockHandler {
    /// Create a new mock handler
    pub fn new() -> Self {
        Self {
            tx_completed: Vec::new(),
            rx_completed: Vec::new(),
            released: Vec::new(),
            rssi_reports: Vec::new(),
            alloc_calls: 0,
            deny_alloc: false,
        }
    }
}

impl PacketHandler for MockHandler {
    fn alloc_packet(&mut self, length: usize) -> Option<RadioPacket> {
        self.alloc_calls += 1;
        if self.deny_alloc || length >= MAX_PACKET_SIZE {
            None
        } else {
            Some(RadioPacket::new())
        }
    }

    fn release_packet(&mut self, packet: RadioPacket) {
        self.released.push(packet).unwrap();
    }

    fn rx_complete(&mut self, packet: RadioPacket) {
        self.rx_completed.push(packet).unwrap();
    }

    fn tx_complete(&mut self, packet: RadioPacket) {
        self.tx_completed.push(packet).unwrap();
    }

    fn rssi_valid(&mut self, rssi_dbm: i16) {
        self.rssi_reports.push(rssi_dbm).unwrap();
    }
}
