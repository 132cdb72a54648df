// src/controllers/osc/mod.rs
// OSC Controller

use nannou_osc as osc;
use std::error::Error;

#[derive(Debug)]
pub enum OscCommand {
    BeltCreate {
        id: String,
        direction: String,
        autospawn: bool,
        kind: String,
    },
    BeltDirection {
        id: String,
        direction: String,
    },
    BeltSpawn {
        id: String,
    },
    BeltRemove {
        id: String,
    },
    ClearGrid,
}

pub struct OscController {
    command_queue: Vec<OscCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> Result<Self, Box<dyn Error>> {
        let receiver = osc::receiver(port)?;

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    pub fn process_messages(&mut self) {
        for (packet, _addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                match message.addr.as_str() {
                    "/belt/create" => {
                        if let [osc::Type::String(id), osc::Type::String(direction), osc::Type::Int(autospawn), osc::Type::String(kind)] =
                            &message.args[..]
                        {
                            self.command_queue.push(OscCommand::BeltCreate {
                                id: id.clone(),
                                direction: direction.clone(),
                                autospawn: *autospawn != 0,
                                kind: kind.clone(),
                            });
                        }
                    }
                    "/belt/direction" => {
                        if let [osc::Type::String(id), osc::Type::String(direction)] =
                            &message.args[..]
                        {
                            self.command_queue.push(OscCommand::BeltDirection {
                                id: id.clone(),
                                direction: direction.clone(),
                            });
                        }
                    }
                    "/belt/spawn" => {
                        if let [osc::Type::String(id)] = &message.args[..] {
                            self.command_queue
                                .push(OscCommand::BeltSpawn { id: id.clone() });
                        }
                    }
                    "/belt/remove" => {
                        if let [osc::Type::String(id)] = &message.args[..] {
                            self.command_queue
                                .push(OscCommand::BeltRemove { id: id.clone() });
                        }
                    }
                    "/grid/clear" => {
                        self.command_queue.push(OscCommand::ClearGrid);
                    }
                    _ => println!("Unknown OSC address pattern: {}", message.addr),
                };
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<OscCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

pub struct OscSender {
    sender: osc::Sender,
    target_addr: String,
    target_port: u16,
}

impl OscSender {
    pub fn new(target_port: u16) -> Result<Self, Box<dyn Error>> {
        let target_addr = "127.0.0.1".to_string();
        let sender = osc::sender()?;

        Ok(Self {
            sender,
            target_addr,
            target_port,
        })
    }

    pub fn send_belt_create(&self, id: &str, direction: &str, autospawn: bool, kind: &str) {
        let addr = "/belt/create".to_string();
        let args = vec![
            osc::Type::String(id.to_string()),
            osc::Type::String(direction.to_string()),
            osc::Type::Int(autospawn as i32),
            osc::Type::String(kind.to_string()),
        ];
        self.sender
            .send((addr, args), (self.target_addr.as_str(), self.target_port))
            .ok();
    }

    pub fn send_belt_direction(&self, id: &str, direction: &str) {
        let addr = "/belt/direction".to_string();
        let args = vec![
            osc::Type::String(id.to_string()),
            osc::Type::String(direction.to_string()),
        ];
        self.sender
            .send((addr, args), (self.target_addr.as_str(), self.target_port))
            .ok();
    }

    pub fn send_belt_spawn(&self, id: &str) {
        let addr = "/belt/spawn".to_string();
        let args = vec![osc::Type::String(id.to_string())];
        self.sender
            .send((addr, args), (self.target_addr.as_str(), self.target_port))
            .ok();
    }

    pub fn send_belt_remove(&self, id: &str) {
        let addr = "/belt/remove".to_string();
        let args = vec![osc::Type::String(id.to_string())];
        self.sender
            .send((addr, args), (self.target_addr.as_str(), self.target_port))
            .ok();
    }

    pub fn send_clear_grid(&self) {
        let addr = "/grid/clear".to_string();
        self.sender
            .send((addr, vec![]), (self.target_addr.as_str(), self.target_port))
            .ok();
    }
}
