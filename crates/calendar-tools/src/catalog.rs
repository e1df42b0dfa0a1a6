//! Names and phrases used to dress up generated appointments.

pub const CONSULTANTS: &[&str] = &[
    "Sarah Miller",
    "David Kim",
    "Emily Chen",
    "Michael Brown",
    "Priya Patel",
    "Carlos Ramirez",
    "Samantha Lee",
    "James Wilson",
    "Lisa Zhang",
    "Robert Taylor",
    "Maria Garcia",
    "Kevin O'Connor",
];

pub const CLIENTS: &[&str] = &[
    "John Doe",
    "Jane Smith",
    "Tom Evans",
    "Emily Johnson",
    "Michael Lee",
    "Sarah Davis",
    "Chris Wilson",
    "Amanda Thompson",
    "Daniel Rodriguez",
    "Jennifer Kim",
    "Mark Anderson",
    "Rachel Green",
    "Alex Parker",
    "Nicole Brown",
    "Steven Clark",
    "Laura Martinez",
];

pub const MEETING_TYPES: &[&str] = &[
    "Initial Consultation",
    "Strategy Planning Session",
    "Digital Transformation Review",
    "Organizational Assessment",
    "Follow-up Meeting",
    "Project Kickoff",
    "Progress Review",
    "Implementation Planning",
    "Stakeholder Alignment",
    "Executive Briefing",
];

pub const MEETING_DESCRIPTIONS: &[&str] = &[
    "Discussion of business objectives and strategic priorities",
    "Review of current processes and identification of improvement opportunities",
    "Planning session for digital transformation initiatives",
    "Assessment of organizational structure and development needs",
    "Follow-up on previous recommendations and action items",
    "Kickoff meeting for new consulting engagement",
    "Progress review and milestone assessment",
    "Detailed planning for implementation phases",
    "Alignment meeting with key stakeholders",
    "Executive briefing on project outcomes and next steps",
];
